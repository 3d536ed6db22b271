//! End-to-end question-answering pipeline

use crate::answerer::{Answer, Answerer};
use crate::error::{RagError, Result};
use crate::generate::TextGenerator;
use crate::retriever::{DEFAULT_TOP_K, Retriever, RetryPolicy};
use innkeeper_embed::EmbeddingProvider;
use innkeeper_index::VectorIndex;
use std::sync::Arc;

/// Wires the retrieval and answer components together for one question.
///
/// Constructed once at process startup with the three service clients and
/// held for the process lifetime. Every question runs the same strictly
/// sequential flow: embed the question, query the index, generate an
/// answer grounded on the retrieved context. Calls are independent: the
/// pipeline keeps no state between questions, so concurrent use needs no
/// locking beyond what the clients themselves guarantee.
#[derive(Debug)]
pub struct QaPipeline {
    retriever: Retriever,
    answerer: Answerer,
    top_k: usize,
}

impl QaPipeline {
    /// Create a pipeline over the given clients with the default top-k.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            retriever: Retriever::new(embedder, index),
            answerer: Answerer::new(generator),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set how many matches each retrieval consumes.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Enable bounded retries for the embedding and index calls.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retriever = self.retriever.with_retry_policy(retry);
        self
    }

    /// Answer one user question.
    ///
    /// The question is used both as the embedding query and as the
    /// generation question. Empty/whitespace input is rejected before any
    /// outbound call. Embedding and index failures abort the request;
    /// generation failure does not; it yields a displayable answer
    /// describing the failure (see [`Answer::outcome`]).
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        if question.trim().is_empty() {
            return Err(RagError::invalid_input(
                "question must not be empty or whitespace-only",
            ));
        }

        tracing::info!(top_k = self.top_k, "answering question");
        let context = self.retriever.retrieve(question, self.top_k).await?;
        if context.is_empty() {
            tracing::info!("index returned no usable context, generating unguided answer");
        }

        Ok(self.answerer.answer(&context, question).await)
    }
}
