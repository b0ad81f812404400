//! Error types for the book lookup pipeline.

/// Errors that can occur while looking up book records.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A binding lacked a required field or carried a value of the wrong shape.
    #[error("Malformed binding: field '{field}' {reason}")]
    MalformedBinding { field: &'static str, reason: String },

    /// HTTP request to the SPARQL endpoint failed (network, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The SPARQL endpoint answered with an error status code.
    #[error("SPARQL endpoint error (HTTP {status}): {message}")]
    Endpoint { status: u16, message: String },

    /// Endpoint not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse the SPARQL results document.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The identifier list could not be resolved.
    #[error("Identifier list unavailable: {0}")]
    Identifiers(String),

    /// The aggregator was driven out of order.
    #[error("Aggregation error: {0}")]
    Aggregation(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or socket error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for failures raised by the binding source rather than by the
    /// normalizer or the surrounding plumbing.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Endpoint { .. } | Error::NotFound(_) | Error::Parse(_)
        )
    }

    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Error::MalformedBinding {
            field,
            reason: reason.into(),
        }
    }
}

/// Convenience alias for Results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
