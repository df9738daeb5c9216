//! REST client for the upstream ordering backend.
//!
//! # Architecture
//!
//! - The backend is the source of truth - NO local sync, direct API calls
//! - Wire types mirror the backend's JSON field names exactly and are
//!   converted to the clean domain types in `cantina-core` at the client
//!   boundary
//! - Category reads are cached in-memory via `moka` (5 minute TTL);
//!   product reads are never cached because cart reconciliation and
//!   checkout must observe live stock
//!
//! # Example
//!
//! ```rust,ignore
//! use cantina_storefront::api::CatalogClient;
//!
//! let client = CatalogClient::new(&config.backend);
//!
//! // Fresh product snapshot for a cart render
//! let products = client.get_products().await?;
//!
//! // Place an order built from the cart
//! client.create_order(&order).await?;
//! ```

mod client;
mod conversions;
pub mod types;

pub use client::CatalogClient;

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("producto 123".to_string());
        assert_eq!(err.to_string(), "Not found: producto 123");

        let err = ApiError::Status {
            status: 500,
            message: "Error interno".to_string(),
        };
        assert_eq!(err.to_string(), "Backend returned 500: Error interno");
    }

    #[test]
    fn test_body_snippet_truncates() {
        let long = "x".repeat(1000);
        assert_eq!(body_snippet(&long).len(), BODY_SNIPPET_LEN);
        assert_eq!(body_snippet("corto"), "corto");
    }
}
