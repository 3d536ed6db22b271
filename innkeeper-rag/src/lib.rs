//! # innkeeper-rag
//!
//! Retrieval-augmented question answering over a pre-indexed document
//! corpus. Given a user question, the pipeline embeds it, pulls the top-k
//! nearest fragments from a vector index, and asks a generative model to
//! answer from that retrieved context.
//!
//! ## Architecture
//!
//! Three external services, one strictly sequential flow per question:
//!
//! - [`innkeeper_embed`] turns the question into an embedding vector
//! - [`innkeeper_index`] finds the nearest stored fragments
//! - [`generate`] turns context + question into an answer
//!
//! All clients are injected as `Arc<dyn ...>` trait objects at
//! construction, so tests run the whole pipeline against in-memory fakes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use innkeeper_embed::{EmbedConfig, HttpEmbedProvider};
//! use innkeeper_index::{HttpVectorIndex, IndexConfig};
//! use innkeeper_rag::QaPipeline;
//! use innkeeper_rag::generate::{GenerateConfig, HttpGenerator};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let pipeline = QaPipeline::new(
//!     Arc::new(HttpEmbedProvider::new(EmbedConfig::new(
//!         "http://localhost:8080",
//!         "all-mpnet-base-v2",
//!     ))?),
//!     Arc::new(HttpVectorIndex::new(IndexConfig::new(
//!         "https://bookings.example.com",
//!         "bookings",
//!     ))?),
//!     Arc::new(HttpGenerator::new(GenerateConfig::new(
//!         "https://generativelanguage.googleapis.com",
//!         "gemini-1.5-flash",
//!     ))?),
//! );
//!
//! let answer = pipeline.ask("What is the checkout time?").await?;
//! println!("{}", answer.text);
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure model
//!
//! Embedding and index failures abort the request with distinguishable
//! [`RagError`] variants. Generation failure deliberately does not: the
//! answer component downgrades it to a displayable
//! `"An error occurred: {e}"` string so the QA flow always shows
//! something (the distinction survives on [`Answer::outcome`]).

pub mod answerer;
pub mod error;
pub mod generate;
pub mod pipeline;
pub mod prompt;
pub mod retriever;

pub use answerer::{Answer, AnswerOutcome, Answerer};
pub use error::{RagError, Result};
pub use generate::{GenerateConfig, GenerateError, HttpGenerator, TextGenerator};
pub use pipeline::QaPipeline;
pub use prompt::build_prompt;
pub use retriever::{DEFAULT_TOP_K, Retriever, RetryPolicy};
