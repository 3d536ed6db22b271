//! # innkeeper-embed
//!
//! Client for an external text-embedding service. Maps text to fixed-length
//! dense vectors over HTTP, with an async trait seam so the rest of the
//! pipeline can be tested against in-memory fakes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use innkeeper_embed::{EmbedConfig, EmbeddingProvider, HttpEmbedProvider};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = HttpEmbedProvider::new(
//!     EmbedConfig::new("http://localhost:8080", "all-mpnet-base-v2"),
//! )?;
//!
//! let texts = vec!["What is the checkout time?".to_string()];
//! let result = provider.embed_texts(&texts).await?;
//!
//! println!("{} vectors of dimension {}", result.len(), result.dimension);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: endpoint, model and timeout configuration
//! - [`provider`]: the [`EmbeddingProvider`] trait and its HTTP implementation
//! - [`error`]: error types and result handling
//!
//! The wire contract is order-preserving: the service returns one vector per
//! input text, in input order. A response with a different count is reported
//! as [`EmbedError::MalformedResponse`].

pub mod config;
pub mod error;
pub mod provider;

pub use config::EmbedConfig;
pub use error::{EmbedError, Result};
pub use provider::{EmbeddingProvider, EmbeddingResult, HttpEmbedProvider};
