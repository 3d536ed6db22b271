//! # innkeeper-index
//!
//! Read-only client for an external vector index. Supports top-k
//! nearest-neighbor queries with metadata inclusion; the index itself is
//! populated by an out-of-band ingestion pipeline.
//!
//! ## Quick Start
//!
//! ```no_run
//! use innkeeper_index::{HttpVectorIndex, IndexConfig, VectorIndex};
//!
//! # async fn example(query_vector: Vec<f32>) -> anyhow::Result<()> {
//! let index = HttpVectorIndex::new(
//!     IndexConfig::new("https://bookings.example.com", "bookings"),
//! )?;
//!
//! let matches = index.query(&query_vector, 5, true).await?;
//! for m in &matches {
//!     println!("{:.3}: {:?}", m.score, m.text());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Matches are returned in the order the index ranks them (descending
//! similarity). Zero matches is a normal outcome, not an error.

pub mod client;
pub mod config;
pub mod error;

pub use client::{HttpVectorIndex, Match, VectorIndex};
pub use config::IndexConfig;
pub use error::{IndexError, Result};
