// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Contact submission filters.
//!
//! Implements the decision stages of the contact pipeline:
//! - Honeypot check (anti-spam)
//! - Denylisted phrase check (anti-spam)
//! - Link density check (anti-spam)
//! - Required field and email syntax validation

use crate::config::AntiSpamConfig;
use crate::submission::{ContactDetails, Submission};
use email_address::{EmailAddress, Options};
use lettre::Address;
use thiserror::Error;
use tracing::debug;

/// Content-based spam signals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpamSignal {
    #[error("Message contains denylisted phrase {0:?}")]
    Keyword(String),

    #[error("Message contains {marker:?} {count} times (limit {limit})")]
    LinkDensity {
        marker: String,
        count: usize,
        limit: usize,
    },
}

/// Field validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is empty")]
    MissingName,

    #[error("Message is empty")]
    MissingMessage,

    #[error("Invalid email address: {0:?}")]
    InvalidEmail(String),

    #[error("Form body could not be read")]
    MalformedForm,
}

/// Contact submission validator.
pub struct SubmissionValidator {
    config: AntiSpamConfig,
    /// Lowercased copy of the configured denylist
    keywords: Vec<String>,
}

impl SubmissionValidator {
    /// Create a new validator with the given configuration.
    pub fn new(config: AntiSpamConfig) -> Self {
        let keywords = config
            .keywords
            .iter()
            .map(|k| k.to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { config, keywords }
    }

    /// True when the submission should be treated as bot traffic.
    pub fn is_bot(&self, submission: &Submission) -> bool {
        if !self.config.enabled {
            return false;
        }
        let filled = submission.honeypot_filled();
        if filled {
            debug!("Honeypot field filled");
        }
        filled
    }

    /// Check a normalized message body against the denylist and the link
    /// density threshold.
    pub fn check_content(&self, message: &str) -> Result<(), SpamSignal> {
        if !self.config.enabled {
            return Ok(());
        }

        let lowered = message.to_lowercase();
        if let Some(keyword) = self.keywords.iter().find(|k| lowered.contains(k.as_str())) {
            debug!(keyword = %keyword, "Denylisted phrase found");
            return Err(SpamSignal::Keyword(keyword.clone()));
        }

        for marker in self.config.link_markers.iter().filter(|m| !m.is_empty()) {
            let count = message.matches(marker.as_str()).count();
            if count > self.config.max_link_markers {
                debug!(marker = %marker, count, "Link density exceeded");
                return Err(SpamSignal::LinkDensity {
                    marker: marker.clone(),
                    count,
                    limit: self.config.max_link_markers,
                });
            }
        }

        Ok(())
    }

    /// Validate required fields and email syntax.
    pub fn validate_fields(&self, details: &ContactDetails) -> Result<(), ValidationError> {
        if details.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if details.message.is_empty() {
            return Err(ValidationError::MissingMessage);
        }
        if !is_valid_email(&details.email) {
            debug!(email = %details.email, "Email failed syntax check");
            return Err(ValidationError::InvalidEmail(details.email.clone()));
        }
        Ok(())
    }
}

/// Syntax check for a bare address: no display text, no domain literal,
/// domain must have a TLD. The address must also be one the mail transport
/// accepts as a Reply-To.
pub fn is_valid_email(email: &str) -> bool {
    let options = Options::default()
        .with_required_tld()
        .without_display_text();
    EmailAddress::parse_with_options(email, options).is_ok() && email.parse::<Address>().is_ok()
}
