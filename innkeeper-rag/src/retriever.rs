//! Retrieval component: query embedding + nearest-neighbor search

use crate::error::{RagError, Result};
use innkeeper_embed::EmbeddingProvider;
use innkeeper_index::VectorIndex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Default number of matches consumed per query.
pub const DEFAULT_TOP_K: usize = 5;

/// Bounded retry-with-backoff for the embedding and index calls.
///
/// Disabled by default (`max_retries = 0`), which preserves the strictly
/// sequential, non-retrying behavior: exactly one embedding call and one
/// index query per retrieval. A persistently failing call still surfaces
/// as an error, never as an empty context.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure
    pub max_retries: u32,
    /// Fixed delay between attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Retrieves grounding context for a question.
///
/// Holds the embedding and index clients for the process lifetime; both
/// are injected at construction, never re-initialized. Each call embeds
/// the query, asks the index for the top-k nearest neighbors with
/// metadata, and joins the `text` fields of the matches with a single
/// space, in the order the index ranked them.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    retry: RetryPolicy,
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever")
            .field("embedder", &self.embedder.provider_name())
            .field("index", &self.index.index_name())
            .field("retry", &self.retry)
            .finish()
    }
}

impl Retriever {
    /// Create a retriever over the given clients.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndex>) -> Self {
        Self {
            embedder,
            index,
            retry: RetryPolicy::default(),
        }
    }

    /// Enable bounded retries for the embedding and index calls.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Retrieve the context for `query`.
    ///
    /// Returns the empty string when the index has no matches: that is an
    /// empty-evidence condition, not a failure, and is distinguishable
    /// from the error cases. A match whose metadata lacks a usable `text`
    /// field is skipped with a warning; one corrupt index record does not
    /// abort the call.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<String> {
        if query.trim().is_empty() {
            return Err(RagError::invalid_input(
                "query must not be empty or whitespace-only",
            ));
        }
        if top_k == 0 {
            return Err(RagError::invalid_input("top_k must be positive"));
        }

        let texts = [query.to_string()];
        let embedded = self
            .with_retries("embedding", || self.embedder.embed_texts(&texts))
            .await?;
        let vector = embedded.embeddings.into_iter().next().ok_or_else(|| {
            RagError::Embedding {
                source: innkeeper_embed::EmbedError::malformed(
                    "service returned no embedding for the query",
                ),
            }
        })?;

        let matches = self
            .with_retries("index query", || self.index.query(&vector, top_k, true))
            .await?;

        let mut fragments = Vec::with_capacity(matches.len());
        for m in &matches {
            match m.text() {
                Some(text) => fragments.push(text),
                None => {
                    tracing::warn!(
                        id = m.id.as_deref().unwrap_or("<unknown>"),
                        score = m.score,
                        "match metadata has no usable 'text' field, skipping"
                    );
                }
            }
        }

        tracing::debug!(
            matches = matches.len(),
            used = fragments.len(),
            "retrieval complete"
        );
        Ok(fragments.join(" "))
    }

    async fn with_retries<T, E, F, Fut>(&self, what: &str, mut call: F) -> std::result::Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 0u32;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(error) if attempt < self.retry.max_retries => {
                    attempt += 1;
                    tracing::warn!(%error, attempt, "{what} failed, retrying after backoff");
                    tokio::time::sleep(self.retry.backoff).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
