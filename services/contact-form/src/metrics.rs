// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus counters for submission outcomes.

use crate::error::ContactError;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Submission outcome counters backed by a private registry.
pub struct ContactMetrics {
    registry: Registry,
    submissions: IntCounterVec,
}

impl ContactMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        let submissions = IntCounterVec::new(
            Opts::new(
                "contact_form_submissions_total",
                "Contact form submissions by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(submissions.clone()))?;

        // Pre-create every series so dashboards see zeros rather than gaps.
        for outcome in ["sent", "send_failed", "bot", "spam", "invalid"] {
            submissions.with_label_values(&[outcome]);
        }

        Ok(Self {
            registry,
            submissions,
        })
    }

    /// Count one processed submission.
    pub fn record(&self, result: &Result<(), ContactError>) {
        let outcome = match result {
            Ok(()) => "sent",
            Err(err) => err.outcome(),
        };
        self.submissions.with_label_values(&[outcome]).inc();
    }

    /// Current count for an outcome label.
    pub fn count(&self, outcome: &str) -> u64 {
        self.submissions.with_label_values(&[outcome]).get()
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
