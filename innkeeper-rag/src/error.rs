//! Error taxonomy for the QA pipeline
//!
//! Three kinds abort a request and propagate to the caller; generation
//! failure deliberately does not appear here. It is downgraded to a
//! displayable answer string inside the answer component (see
//! [`crate::answerer`]).

use innkeeper_embed::EmbedError;
use innkeeper_index::IndexError;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, RagError>;

/// Errors that abort a question-answering request.
#[derive(Debug, thiserror::Error)]
pub enum RagError {
    /// Empty/whitespace question or non-positive top-k, rejected before
    /// any outbound call
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The embedding service call failed; aborts before any index query
    #[error("Embedding failed: {source}")]
    Embedding {
        #[from]
        source: EmbedError,
    },

    /// The vector index call failed; aborts before generation
    #[error("Index query failed: {source}")]
    IndexQuery {
        #[from]
        source: IndexError,
    },
}

impl RagError {
    /// Create an invalid-input error with a custom message.
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
