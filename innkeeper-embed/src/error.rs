//! Error types for the embedding client

/// Result type for embedding operations.
///
/// Convenience alias using [`EmbedError`] as the error type.
pub type Result<T> = std::result::Result<T, EmbedError>;

/// Error type for all embedding-client operations.
///
/// Covers configuration mistakes caught before any request is sent,
/// transport-level failures, service-side rejections, and responses the
/// client cannot interpret. Integrates with [`thiserror`] for error
/// chaining so callers can inspect the underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    /// The client configuration is invalid (bad endpoint, empty model name, ...)
    #[error("Invalid embedding configuration: {message}")]
    InvalidConfig { message: String },

    /// The HTTP request itself failed (connect, timeout, TLS, ...)
    #[error("Embedding request failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status
    #[error("Embedding service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// The service answered 2xx but the body was not what we expect
    #[error("Malformed embedding response: {message}")]
    MalformedResponse { message: String },
}

impl EmbedError {
    /// Create an invalid configuration error with a custom message.
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a malformed-response error with a custom message.
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }
}
