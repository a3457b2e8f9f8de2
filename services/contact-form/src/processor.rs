// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Submission pipeline.
//!
//! Stages run in order and stop at the first failure:
//! 1. Honeypot check
//! 2. Normalization
//! 3. Denylisted phrase check
//! 4. Link density check
//! 5. Required field and email validation
//! 6. Notification dispatch
//!
//! Stages 1, 3 and 4 only run when anti-spam filtering is enabled.

use crate::config::MailConfig;
use crate::error::{ContactError, Result};
use crate::mailer::{Mailer, MailerError, Notification};
use crate::submission::{ContactDetails, Submission};
use crate::validator::SubmissionValidator;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Runs one submission through the filter chain and hands accepted ones to
/// the mailer.
pub struct SubmissionProcessor {
    validator: SubmissionValidator,
    mailer: Arc<dyn Mailer>,
    recipient: String,
    sender: String,
    subject_prefix: String,
    send_timeout: Duration,
}

impl SubmissionProcessor {
    pub fn new(validator: SubmissionValidator, mailer: Arc<dyn Mailer>, mail: &MailConfig) -> Self {
        Self {
            validator,
            mailer,
            recipient: mail.recipient.clone(),
            sender: mail.sender.clone(),
            subject_prefix: mail.subject_prefix.clone(),
            send_timeout: mail.send_timeout(),
        }
    }

    /// Process a submission. `Ok(())` means the notification was sent.
    pub async fn process(&self, submission: Submission) -> Result<()> {
        if self.validator.is_bot(&submission) {
            return Err(ContactError::BotDetected);
        }

        let details = submission.normalize();

        self.validator
            .check_content(&details.message)
            .map_err(ContactError::SpamContentDetected)?;

        self.validator
            .validate_fields(&details)
            .map_err(ContactError::ValidationFailed)?;

        let notification = self.compose(&details);
        self.dispatch(&notification).await
    }

    /// Build the plain-text notification for accepted contact details.
    pub fn compose(&self, details: &ContactDetails) -> Notification {
        let body = format!(
            "Name: {}\nEmail: {}\nSubject: {}\n\nMessage:\n{}\n",
            details.name, details.email, details.subject, details.message
        );
        Notification {
            to: self.recipient.clone(),
            from: self.sender.clone(),
            reply_to: details.email.clone(),
            subject: format!("{}{}", self.subject_prefix, details.subject),
            body,
        }
    }

    async fn dispatch(&self, notification: &Notification) -> Result<()> {
        match tokio::time::timeout(self.send_timeout, self.mailer.send(notification)).await {
            Ok(Ok(())) => {
                debug!(to = %notification.to, "Notification dispatched");
                Ok(())
            }
            Ok(Err(err)) => {
                warn!(error = %err, "Notification delivery failed");
                Err(err.into())
            }
            Err(_) => {
                let ms = self.send_timeout.as_millis() as u64;
                warn!(timeout_ms = ms, "Notification delivery timed out");
                Err(MailerError::Timeout(ms).into())
            }
        }
    }
}
