//! Error types for the vector index client

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Error type for all vector-index operations.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The client configuration is invalid (bad endpoint, empty index name, ...)
    #[error("Invalid index configuration: {message}")]
    InvalidConfig { message: String },

    /// The HTTP request itself failed (connect, timeout, TLS, ...)
    #[error("Index query failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    /// The index answered with a non-success status
    #[error("Vector index returned {status}: {message}")]
    Service { status: u16, message: String },

    /// The index answered 2xx but the body was not what we expect
    #[error("Malformed index response: {message}")]
    MalformedResponse { message: String },
}

impl IndexError {
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
