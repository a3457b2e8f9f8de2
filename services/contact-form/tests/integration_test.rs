// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the contact submission pipeline.

use async_trait::async_trait;
use contact_form::{
    config::{AntiSpamConfig, MailConfig},
    mailer::{Mailer, MailerError, Notification},
    ContactError, Submission, SubmissionProcessor, SubmissionValidator, ValidationError,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mailer that keeps every notification it is given.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingMailer {
    fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, notification: &Notification) -> Result<(), MailerError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _notification: &Notification) -> Result<(), MailerError> {
        Err(MailerError::Transport("connection refused".to_string()))
    }
}

struct StalledMailer;

#[async_trait]
impl Mailer for StalledMailer {
    async fn send(&self, _notification: &Notification) -> Result<(), MailerError> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(())
    }
}

fn processor_with(mailer: Arc<dyn Mailer>, anti_spam: AntiSpamConfig) -> SubmissionProcessor {
    SubmissionProcessor::new(
        SubmissionValidator::new(anti_spam),
        mailer,
        &MailConfig::default(),
    )
}

fn jane() -> Submission {
    Submission {
        website_url: Some(String::new()),
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        subject: "Hello".to_string(),
        message: "Interested in your services.".to_string(),
    }
}

#[tokio::test]
async fn test_valid_submission_is_sent() {
    let mailer = Arc::new(RecordingMailer::default());
    let processor = processor_with(mailer.clone(), AntiSpamConfig::default());

    processor.process(jane()).await.unwrap();

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].reply_to, "jane@example.com");
    assert_eq!(sent[0].to, "contact@example.com");
    assert_eq!(sent[0].subject, "New Contact from Website: Hello");
    assert!(sent[0].body.contains("Name: Jane Doe"));
    assert!(sent[0].body.contains("Interested in your services."));
}

#[tokio::test]
async fn test_honeypot_rejected_without_sending() {
    let mailer = Arc::new(RecordingMailer::default());
    let processor = processor_with(mailer.clone(), AntiSpamConfig::default());

    let submission = Submission {
        website_url: Some("https://bot.example".to_string()),
        ..jane()
    };
    let err = processor.process(submission).await.unwrap_err();

    assert!(matches!(err, ContactError::BotDetected));
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_honeypot_ignored_with_anti_spam_disabled() {
    let mailer = Arc::new(RecordingMailer::default());
    let processor = processor_with(
        mailer.clone(),
        AntiSpamConfig {
            enabled: false,
            ..Default::default()
        },
    );

    let submission = Submission {
        website_url: Some("https://bot.example".to_string()),
        message: "Visit our casino".to_string(),
        ..jane()
    };
    processor.process(submission).await.unwrap();
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_keyword_rejected() {
    let mailer = Arc::new(RecordingMailer::default());
    let processor = processor_with(mailer.clone(), AntiSpamConfig::default());

    let submission = Submission {
        message: "Learn to MAKE MONEY ONLINE today".to_string(),
        ..jane()
    };
    let err = processor.process(submission).await.unwrap_err();

    assert!(matches!(err, ContactError::SpamContentDetected(_)));
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_link_density() {
    let mailer = Arc::new(RecordingMailer::default());
    let processor = processor_with(mailer.clone(), AntiSpamConfig::default());

    let four_http = Submission {
        message: "see http://a and http://b and http://c and http://d".to_string(),
        ..jane()
    };
    let err = processor.process(four_http).await.unwrap_err();
    assert!(matches!(err, ContactError::SpamContentDetected(_)));

    let three_each = Submission {
        message: "see http://www.a, http://www.b and http://www.c".to_string(),
        ..jane()
    };
    processor.process(three_each).await.unwrap();
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_validation_failures() {
    let processor = processor_with(
        Arc::new(RecordingMailer::default()),
        AntiSpamConfig::default(),
    );

    let cases = [
        (
            Submission {
                name: "   ".to_string(),
                ..jane()
            },
            ValidationError::MissingName,
        ),
        (
            Submission {
                name: "<b></b>".to_string(),
                ..jane()
            },
            ValidationError::MissingName,
        ),
        (
            Submission {
                message: "\n\n".to_string(),
                ..jane()
            },
            ValidationError::MissingMessage,
        ),
        (
            Submission {
                email: "jane.example.com".to_string(),
                ..jane()
            },
            ValidationError::InvalidEmail("jane.example.com".to_string()),
        ),
        (
            Submission {
                email: "jane@[127.0.0.1]".to_string(),
                ..jane()
            },
            ValidationError::InvalidEmail("jane@[127.0.0.1]".to_string()),
        ),
    ];

    for (submission, expected) in cases {
        match processor.process(submission).await {
            Err(ContactError::ValidationFailed(err)) => assert_eq!(err, expected),
            other => panic!("expected validation failure {expected:?}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_sanitized_email_used_for_reply_to() {
    let mailer = Arc::new(RecordingMailer::default());
    let processor = processor_with(mailer.clone(), AntiSpamConfig::default());

    let submission = Submission {
        email: "  jane@example.com\r\n ".to_string(),
        ..jane()
    };
    processor.process(submission).await.unwrap();

    assert_eq!(mailer.sent()[0].reply_to, "jane@example.com");
}

#[tokio::test]
async fn test_mailer_failure_is_send_failed() {
    let processor = processor_with(Arc::new(FailingMailer), AntiSpamConfig::default());

    let err = processor.process(jane()).await.unwrap_err();
    assert!(matches!(
        err,
        ContactError::DeliveryFailed(MailerError::Transport(_))
    ));
    assert_eq!(err.outcome(), "send_failed");
}

#[tokio::test]
async fn test_stalled_mailer_times_out() {
    let processor = SubmissionProcessor::new(
        SubmissionValidator::new(AntiSpamConfig::default()),
        Arc::new(StalledMailer),
        &MailConfig {
            send_timeout_ms: 50,
            ..Default::default()
        },
    );

    let err = processor.process(jane()).await.unwrap_err();
    assert!(matches!(
        err,
        ContactError::DeliveryFailed(MailerError::Timeout(50))
    ));
}
