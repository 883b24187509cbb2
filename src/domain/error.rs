//! Error types for the cinesearch plugin.
//!
//! [`CinesearchError`] covers every failure the plugin can observe, from a
//! movie search request that never completed to a theme file that would not
//! parse. The search page collapses all request failures into a single
//! `Rejected` status; the variants exist so logs can tell them apart.

use thiserror::Error;

/// The main error type for cinesearch operations.
///
/// # Examples
///
/// ```
/// use cinesearch::CinesearchError;
///
/// let err = CinesearchError::Api { status_code: 401, message: "Invalid API key".to_string() };
/// assert_eq!(err.to_string(), "API error: 401 - Invalid API key");
/// ```
#[derive(Debug, Error)]
pub enum CinesearchError {
    /// The host could not complete the HTTP request (DNS, TLS, connection reset).
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The movie database answered with a non-success status code.
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code returned by the API.
        status_code: u16,
        /// Response body, usually a JSON error document.
        message: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("Failed to parse JSON response at {path}: {source}")]
    Json {
        /// Location of the offending value inside the document.
        path: String,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for cinesearch operations.
pub type Result<T> = std::result::Result<T, CinesearchError>;
