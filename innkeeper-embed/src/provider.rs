//! Embedding provider implementations

use crate::config::EmbedConfig;
use crate::error::{EmbedError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of embedding generation
#[derive(Debug, Clone)]
pub struct EmbeddingResult {
    /// The generated embeddings, one per input text, in input order
    pub embeddings: Vec<Vec<f32>>,
    /// The dimension of each embedding vector
    pub dimension: usize,
}

impl EmbeddingResult {
    /// Create a new embedding result, inferring the dimension from the
    /// first vector (0 when empty).
    pub fn new(embeddings: Vec<Vec<f32>>) -> Self {
        let dimension = embeddings.first().map(|e| e.len()).unwrap_or(0);
        Self {
            embeddings,
            dimension,
        }
    }

    /// Number of embedding vectors in this result.
    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    /// Whether this result contains no embedding vectors.
    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }
}

/// Trait for embedding providers that can generate embeddings from text.
///
/// Implementations are expected to be safe for concurrent independent
/// calls; the pipeline holds one instance behind an `Arc` for the process
/// lifetime.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embeddings for multiple texts, order-preserving.
    async fn embed_texts(&self, texts: &[String]) -> Result<EmbeddingResult>;

    /// Generate an embedding for a single text.
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let texts = [text.to_string()];
        let result = self.embed_texts(&texts).await?;
        result
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| EmbedError::malformed("service returned no embedding"))
    }

    /// Name/identifier of this provider, for logs.
    fn provider_name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    inputs: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl EmbedResponse {
    /// Check the one part of the order-preserving contract we can verify
    /// locally: one vector per input text.
    fn into_result(self, expected: usize) -> Result<EmbeddingResult> {
        if self.embeddings.len() != expected {
            return Err(EmbedError::malformed(format!(
                "expected {} embeddings, got {}",
                expected,
                self.embeddings.len()
            )));
        }
        Ok(EmbeddingResult::new(self.embeddings))
    }
}

/// Embedding provider backed by an HTTP embedding service.
///
/// Posts `{"model", "inputs"}` to `{endpoint}/embed` and expects
/// `{"embeddings": [[f32], ...]}` back, one vector per input text in
/// input order.
#[derive(Clone)]
pub struct HttpEmbedProvider {
    config: EmbedConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for HttpEmbedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEmbedProvider")
            .field("endpoint", &self.config.endpoint)
            .field("model", &self.config.model)
            .finish()
    }
}

impl HttpEmbedProvider {
    /// Create a provider from a validated configuration.
    pub fn new(config: EmbedConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmbedError::Http { source: e })?;
        tracing::info!(
            endpoint = %config.endpoint,
            model = %config.model,
            "created embedding provider"
        );
        Ok(Self { config, client })
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbedProvider {
    async fn embed_texts(&self, texts: &[String]) -> Result<EmbeddingResult> {
        if texts.is_empty() {
            return Ok(EmbeddingResult::new(Vec::new()));
        }

        let body = EmbedRequest {
            model: &self.config.model,
            inputs: texts,
        };

        let mut request = self.client.post(self.config.embed_url()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(count = texts.len(), "requesting embeddings");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbedError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbedError::malformed(format!("invalid JSON body: {e}")))?;

        let result = parsed.into_result(texts.len())?;
        tracing::debug!(
            count = result.len(),
            dimension = result.dimension,
            "received embeddings"
        );
        Ok(result)
    }

    fn provider_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_result_dimension() {
        let result = EmbeddingResult::new(vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.dimension, 3);
        assert!(!result.is_empty());

        let empty = EmbeddingResult::new(Vec::new());
        assert_eq!(empty.dimension, 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"embeddings": [[0.25, -0.5], [1.0, 0.0]]}"#;
        let parsed: EmbedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.embeddings.len(), 2);
        assert_eq!(parsed.embeddings[0], vec![0.25, -0.5]);
    }

    #[test]
    fn test_vector_count_mismatch_is_malformed() {
        let parsed: EmbedResponse =
            serde_json::from_str(r#"{"embeddings": [[0.1, 0.2]]}"#).unwrap();
        let err = parsed.into_result(2).unwrap_err();
        assert!(matches!(err, EmbedError::MalformedResponse { .. }));

        let parsed: EmbedResponse = serde_json::from_str(r#"{"embeddings": []}"#).unwrap();
        let err = parsed.into_result(1).unwrap_err();
        assert!(matches!(err, EmbedError::MalformedResponse { .. }));

        let parsed: EmbedResponse =
            serde_json::from_str(r#"{"embeddings": [[0.1, 0.2]]}"#).unwrap();
        let result = parsed.into_result(1).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_provider_rejects_bad_config() {
        let config = EmbedConfig::new("not-a-url", "m");
        assert!(HttpEmbedProvider::new(config).is_err());
    }
}
