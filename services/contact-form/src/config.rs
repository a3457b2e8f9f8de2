// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the contact form service.
//!
//! Values come from three layers, later ones winning: built-in defaults,
//! an optional JSON file named by `CONTACT_FORM_CONFIG`, and environment
//! variables (a `.env` file is honoured by the binary).

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Configuration for the contact form service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Where callers are redirected after a submission
    #[serde(default)]
    pub form: FormConfig,

    /// Honeypot, keyword and link density filtering
    #[serde(default)]
    pub anti_spam: AntiSpamConfig,

    /// Notification addressing and transport
    #[serde(default)]
    pub mail: MailConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Redirect target for the HTML form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Form page the caller is sent back to (default: index.html)
    #[serde(default = "default_form_page")]
    pub page: String,

    /// Fragment appended to success and server error redirects
    /// (default: contact-section). `None` omits the fragment.
    #[serde(default = "default_form_anchor")]
    pub anchor: Option<String>,
}

/// Anti-spam stages. Field validation always runs regardless of `enabled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntiSpamConfig {
    /// Enables the honeypot, keyword and link density stages (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Phrases that mark a message as spam, matched case-insensitively
    #[serde(default = "default_spam_keywords")]
    pub keywords: Vec<String>,

    /// Substrings counted as links, matched case-sensitively
    #[serde(default = "default_link_markers")]
    pub link_markers: Vec<String>,

    /// Highest allowed occurrence count for any single link marker (default: 3)
    #[serde(default = "default_max_link_markers")]
    pub max_link_markers: usize,
}

/// Which transport delivers notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailTransport {
    /// SMTP relay addressed by `smtp_url`
    Smtp,
    /// Write notifications to the log and report success
    Log,
}

impl FromStr for MailTransport {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smtp" => Ok(Self::Smtp),
            "log" => Ok(Self::Log),
            _ => Err(()),
        }
    }
}

/// Notification addressing and transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Address notifications are delivered to
    #[serde(default = "default_recipient")]
    pub recipient: String,

    /// From header, may carry a display name
    #[serde(default = "default_sender")]
    pub sender: String,

    /// Prepended to the submitted subject
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,

    #[serde(default = "default_transport")]
    pub transport: MailTransport,

    /// SMTP relay URL, e.g. `smtp://localhost:25` or `smtps://relay.example.com`
    #[serde(default = "default_smtp_url")]
    pub smtp_url: String,

    #[serde(default)]
    pub smtp_username: Option<String>,

    #[serde(default, skip_serializing)]
    pub smtp_password: Option<String>,

    /// Upper bound on a single delivery attempt in milliseconds (default: 30000)
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

/// Routes owned by the service itself.
const RESERVED_PATHS: &[&str] = &["/contact", "/health", "/healthz"];

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_form_page() -> String {
    "index.html".to_string()
}

fn default_form_anchor() -> Option<String> {
    Some("contact-section".to_string())
}

fn default_spam_keywords() -> Vec<String> {
    [
        "seo service",
        "web design",
        "rank your website",
        "improve your ranking",
        "marketing proposal",
        "viagra",
        "casino",
        "lottery",
        "cryptocurrency investment scheme",
        "passive income from home",
        "make money online",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_link_markers() -> Vec<String> {
    vec!["http".to_string(), "www.".to_string()]
}

fn default_max_link_markers() -> usize {
    3
}

fn default_recipient() -> String {
    "contact@example.com".to_string()
}

fn default_sender() -> String {
    "Website Contact Form <noreply@example.com>".to_string()
}

fn default_subject_prefix() -> String {
    "New Contact from Website: ".to_string()
}

fn default_transport() -> MailTransport {
    MailTransport::Smtp
}

fn default_smtp_url() -> String {
    "smtp://localhost:25".to_string()
}

fn default_send_timeout_ms() -> u64 {
    30000
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            form: FormConfig::default(),
            anti_spam: AntiSpamConfig::default(),
            mail: MailConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            page: default_form_page(),
            anchor: default_form_anchor(),
        }
    }
}

impl Default for AntiSpamConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            keywords: default_spam_keywords(),
            link_markers: default_link_markers(),
            max_link_markers: default_max_link_markers(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            recipient: default_recipient(),
            sender: default_sender(),
            subject_prefix: default_subject_prefix(),
            transport: default_transport(),
            smtp_url: default_smtp_url(),
            smtp_username: None,
            smtp_password: None,
            send_timeout_ms: default_send_timeout_ms(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl MailConfig {
    /// Get the delivery timeout
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }
}

impl Config {
    /// Load configuration from the file named by `CONTACT_FORM_CONFIG`
    /// (if set) and then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("CONTACT_FORM_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mail.send_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                var: "SEND_TIMEOUT_MS",
                value: self.mail.send_timeout_ms.to_string(),
            });
        }

        let path = self.metrics.path.as_str();
        if !path.starts_with('/') || RESERVED_PATHS.contains(&path) {
            return Err(ConfigError::InvalidValue {
                var: "metrics.path",
                value: path.to_string(),
            });
        }

        Ok(())
    }

    /// Read a JSON config file. Missing sections fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production, a map in tests).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("BIND_ADDR") {
            self.bind_addr = v;
        }
        if let Some(v) = lookup("FORM_PAGE") {
            self.form.page = v;
        }
        if let Some(v) = lookup("FORM_ANCHOR") {
            let v = v.trim().trim_start_matches('#').to_string();
            self.form.anchor = if v.is_empty() { None } else { Some(v) };
        }
        if let Some(v) = lookup("ANTI_SPAM_ENABLED") {
            self.anti_spam.enabled = parse_bool("ANTI_SPAM_ENABLED", &v)?;
        }
        if let Some(v) = lookup("SPAM_KEYWORDS") {
            self.anti_spam.keywords = v
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(v) = lookup("MAX_LINK_MARKERS") {
            self.anti_spam.max_link_markers = parse_value("MAX_LINK_MARKERS", &v)?;
        }
        if let Some(v) = lookup("MAIL_RECIPIENT") {
            self.mail.recipient = v;
        }
        if let Some(v) = lookup("MAIL_SENDER") {
            self.mail.sender = v;
        }
        if let Some(v) = lookup("MAIL_SUBJECT_PREFIX") {
            self.mail.subject_prefix = v;
        }
        if let Some(v) = lookup("MAIL_TRANSPORT") {
            self.mail.transport = v.parse().map_err(|_| ConfigError::InvalidValue {
                var: "MAIL_TRANSPORT",
                value: v.clone(),
            })?;
        }
        if let Some(v) = lookup("SMTP_URL") {
            self.mail.smtp_url = v;
        }
        if let Some(v) = lookup("SMTP_USERNAME") {
            self.mail.smtp_username = Some(v);
        }
        if let Some(v) = lookup("SMTP_PASSWORD") {
            self.mail.smtp_password = Some(v);
        }
        if let Some(v) = lookup("SEND_TIMEOUT_MS") {
            self.mail.send_timeout_ms = parse_value("SEND_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = lookup("METRICS_ENABLED") {
            self.metrics.enabled = parse_bool("METRICS_ENABLED", &v)?;
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        }),
    }
}
