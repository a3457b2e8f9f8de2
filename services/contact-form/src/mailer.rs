// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outbound notification delivery.
//!
//! The processor only sees the [`Mailer`] trait. [`SmtpMailer`] relays through
//! an SMTP server; [`LogMailer`] writes notifications to the log and is meant
//! for local runs.

use crate::config::{MailConfig, MailTransport};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Plain-text email handed to a mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub from: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
}

/// Delivery error types.
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Invalid {field} address: {source}")]
    Address {
        field: &'static str,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Delivery timed out after {0} ms")]
    Timeout(u64),
}

/// Capability that transmits a notification.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), MailerError>;
}

/// SMTP relay mailer.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build a transport from the configured SMTP URL. Credentials are only
    /// attached when both username and password are set.
    pub fn from_config(config: &MailConfig) -> Result<Self, MailerError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::from_url(&config.smtp_url)
            .map_err(|e| MailerError::Transport(e.to_string()))?
            .timeout(Some(config.send_timeout()));

        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<(), MailerError> {
        let message = build_message(notification)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;
        debug!(to = %notification.to, "Notification relayed");
        Ok(())
    }
}

/// Mailer that logs each notification and reports success.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, notification: &Notification) -> Result<(), MailerError> {
        debug!(
            to = %notification.to,
            from = %notification.from,
            reply_to = %notification.reply_to,
            subject = %notification.subject,
            body = %notification.body,
            "Notification (log transport)"
        );
        Ok(())
    }
}

/// Construct the mailer selected by the configuration.
pub fn from_config(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailerError> {
    match config.transport {
        MailTransport::Smtp => Ok(Arc::new(SmtpMailer::from_config(config)?)),
        MailTransport::Log => Ok(Arc::new(LogMailer)),
    }
}

/// Convert a notification into a lettre message.
pub fn build_message(notification: &Notification) -> Result<Message, MailerError> {
    let message = Message::builder()
        .from(parse_mailbox("from", &notification.from)?)
        .reply_to(parse_mailbox("reply-to", &notification.reply_to)?)
        .to(parse_mailbox("to", &notification.to)?)
        .subject(notification.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(notification.body.clone())?;
    Ok(message)
}

fn parse_mailbox(field: &'static str, value: &str) -> Result<Mailbox, MailerError> {
    value
        .parse()
        .map_err(|source| MailerError::Address { field, source })
}
