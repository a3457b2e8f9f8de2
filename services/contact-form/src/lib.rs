// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Form Service
//!
//! This crate accepts website contact form posts, filters out bots and spam,
//! and forwards accepted messages as plain-text email:
//!
//! - Honeypot field check
//! - Denylisted phrase filtering
//! - Link density filtering
//! - Required field and email syntax validation
//! - Notification dispatch through a pluggable mailer

pub mod config;
pub mod error;
pub mod handlers;
pub mod mailer;
pub mod metrics;
pub mod processor;
pub mod submission;
pub mod validator;

pub use config::Config;
pub use error::ContactError;
pub use mailer::{Mailer, MailerError, Notification};
pub use processor::SubmissionProcessor;
pub use submission::{ContactDetails, Submission};
pub use validator::{SpamSignal, SubmissionValidator, ValidationError};
