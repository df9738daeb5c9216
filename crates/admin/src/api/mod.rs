//! REST client for the ordering backend's management endpoints.
//!
//! # Architecture
//!
//! - The backend is the source of truth - NO local sync, direct API calls
//! - Wire types mirror the backend's JSON field names exactly and are
//!   converted to the clean domain types in `cantina-core` at the client
//!   boundary
//! - Nothing is cached: admins act on live data

mod client;
mod conversions;
pub mod types;

pub use client::AdminClient;

use thiserror::Error;

/// Maximum number of body characters echoed into errors and logs.
const BODY_SNIPPET_LEN: usize = 200;

/// Errors that can occur when talking to the ordering backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided body text, truncated.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend's payload was syntactically valid but semantically
    /// unusable (e.g. an unparseable order timestamp).
    #[error("Invalid backend data: {0}")]
    Data(String),
}

/// Truncate a response body for error messages and logs.
fn body_snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}
