// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for the contact pipeline

use crate::mailer::MailerError;
use crate::validator::{SpamSignal, ValidationError};
use thiserror::Error;

/// Why a submission did not result in a sent notification.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Bot detected: honeypot field filled")]
    BotDetected,

    #[error("Spam content detected: {0}")]
    SpamContentDetected(SpamSignal),

    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationError),

    #[error("Delivery failed: {0}")]
    DeliveryFailed(#[from] MailerError),
}

impl ContactError {
    /// Label used for the outcome metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            ContactError::BotDetected => "bot",
            ContactError::SpamContentDetected(_) => "spam",
            ContactError::ValidationFailed(_) => "invalid",
            ContactError::DeliveryFailed(_) => "send_failed",
        }
    }

    /// True for rejections that must not reveal the anti-spam logic.
    pub fn is_spam(&self) -> bool {
        matches!(
            self,
            ContactError::BotDetected | ContactError::SpamContentDetected(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ContactError>;
