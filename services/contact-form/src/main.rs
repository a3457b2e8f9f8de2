// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Form Service
//!
//! Receives contact form posts from a static website, filters bot and spam
//! traffic, and relays accepted messages to a fixed recipient by email.
//!
//! ## Endpoints
//!
//! - `POST /contact`: form-encoded `website_url`, `name`, `email`,
//!   `subject`, `message`. Answers with a redirect back to the form page.
//! - `GET /health`, `GET /healthz`: liveness.
//! - `GET /metrics`: Prometheus outcome counters.
//!
//! ## Configuration
//!
//! Configuration is loaded from an optional JSON file (`CONTACT_FORM_CONFIG`)
//! and environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `FORM_PAGE`: Redirect target (default: index.html)
//! - `FORM_ANCHOR`: Fragment on success/server error (default: contact-section)
//! - `ANTI_SPAM_ENABLED`: Honeypot, keyword and link checks (default: true)
//! - `SPAM_KEYWORDS`: Comma-separated denylist override
//! - `MAX_LINK_MARKERS`: Link marker threshold (default: 3)
//! - `MAIL_RECIPIENT`, `MAIL_SENDER`, `MAIL_SUBJECT_PREFIX`
//! - `MAIL_TRANSPORT`: `smtp` or `log` (default: smtp)
//! - `SMTP_URL`, `SMTP_USERNAME`, `SMTP_PASSWORD`
//! - `SEND_TIMEOUT_MS`: Delivery timeout (default: 30000)
//! - `METRICS_ENABLED`: Expose `/metrics` (default: true)

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contact_form::{
    config::Config,
    handlers::{router, AppState},
    mailer,
    metrics::ContactMetrics,
    processor::SubmissionProcessor,
    validator::SubmissionValidator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    info!(
        bind_addr = %config.bind_addr,
        anti_spam = config.anti_spam.enabled,
        keywords = config.anti_spam.keywords.len(),
        max_link_markers = config.anti_spam.max_link_markers,
        transport = ?config.mail.transport,
        recipient = %config.mail.recipient,
        "Starting contact form service"
    );

    // Create application state
    let mailer = mailer::from_config(&config.mail)?;
    let validator = SubmissionValidator::new(config.anti_spam.clone());
    let processor = SubmissionProcessor::new(validator, mailer, &config.mail);

    let state = Arc::new(AppState {
        processor,
        metrics: ContactMetrics::new()?,
        config: config.clone(),
    });

    // Build router
    let app = router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
