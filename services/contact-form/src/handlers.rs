// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the contact form service.
//!
//! The contact endpoint answers a browser form post, so every outcome is
//! either a redirect back to the form page or a bare text body. Spam and bot
//! rejections get the same generic text so callers cannot tell which filter fired.

use crate::config::{Config, FormConfig};
use crate::error::ContactError;
use crate::metrics::ContactMetrics;
use crate::processor::SubmissionProcessor;
use crate::submission::Submission;
use crate::validator::ValidationError;
use axum::{
    extract::{rejection::FormRejection, Form, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Body returned for bot and spam rejections.
pub const GENERIC_ERROR: &str = "System error. Please try again later.";

/// Shared application state.
pub struct AppState {
    pub processor: SubmissionProcessor,
    pub metrics: ContactMetrics,
    pub config: Config,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Status indicator carried back to the form page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Error,
    Success,
    ServerError,
}

impl FormStatus {
    fn as_str(self) -> &'static str {
        match self {
            FormStatus::Error => "error",
            FormStatus::Success => "success",
            FormStatus::ServerError => "server_error",
        }
    }

    /// Only outcomes after a delivery attempt jump to the contact section.
    fn anchored(self) -> bool {
        !matches!(self, FormStatus::Error)
    }
}

/// Redirect target for a given status, e.g. `index.html?status=success#contact-section`.
pub fn redirect_location(form: &FormConfig, status: FormStatus) -> String {
    let mut location = format!("{}?status={}", form.page, status.as_str());
    if status.anchored() {
        if let Some(anchor) = form.anchor.as_deref() {
            location.push('#');
            location.push_str(anchor);
        }
    }
    location
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/contact", post(submit).fallback(form_redirect));

    if state.config.metrics.enabled {
        app = app.route(&state.config.metrics.path, get(metrics));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "contact-form",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Accept a contact form post.
///
/// A body that cannot be read as the contact form is treated like a
/// submission that failed validation.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    submission: Result<Form<Submission>, FormRejection>,
) -> Response {
    let form = &state.config.form;

    let result = match submission {
        Ok(Form(submission)) => state.processor.process(submission).await,
        Err(rejection) => {
            debug!(status = %rejection.status(), "Form body rejected");
            Err(ContactError::ValidationFailed(ValidationError::MalformedForm))
        }
    };
    state.metrics.record(&result);

    match result {
        Ok(()) => {
            info!("Contact notification sent");
            Redirect::to(&redirect_location(form, FormStatus::Success)).into_response()
        }
        Err(err) if err.is_spam() => {
            info!(reason = %err, "Submission rejected as spam");
            (StatusCode::OK, GENERIC_ERROR).into_response()
        }
        Err(err @ ContactError::ValidationFailed(_)) => {
            debug!(reason = %err, "Submission failed validation");
            Redirect::to(&redirect_location(form, FormStatus::Error)).into_response()
        }
        Err(err) => {
            warn!(error = %err, "Contact notification not sent");
            Redirect::to(&redirect_location(form, FormStatus::ServerError)).into_response()
        }
    }
}

/// Anything other than a POST goes back to the form page.
pub async fn form_redirect(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::to(&state.config.form.page)
}

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
