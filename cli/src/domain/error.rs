//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use ravello_common::DocumentError;
use thiserror::Error;

// ── Session errors ────────────────────────────────────────────────────────────

/// Failures while establishing the session or fetching the source documents.
///
/// These are the only failures the tool recovers from locally: the error is
/// printed and the process exits with [`SessionError::EXIT_CODE`].
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot log in as '{username}': {reason}")]
    Login { username: String, reason: String },

    #[error("Cannot fetch application {app_id}: {reason}")]
    ApplicationFetch { app_id: u64, reason: String },

    #[error("Cannot fetch template {template_id}: {reason}")]
    TemplateFetch { template_id: u64, reason: String },
}

impl SessionError {
    /// Process exit status used for session failures (255 on Unix).
    pub const EXIT_CODE: i32 = -1;
}

// ── Clone errors ──────────────────────────────────────────────────────────────

/// The application or template did not have the shape cloning relies on.
#[derive(Debug, Error)]
pub enum CloneError {
    #[error("malformed template: {0}")]
    MalformedTemplate(DocumentError),

    #[error("malformed application: {0}")]
    MalformedApplication(DocumentError),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API URL '{0}': must start with http:// or https://")]
    InvalidApiUrl(String),
}
