//! Vector index client implementations

use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One nearest-neighbor match returned by the index.
///
/// Matches are transient: they exist only for the duration of one query
/// call and are never persisted by this client.
#[derive(Debug, Clone, Deserialize)]
pub struct Match {
    /// Record identifier assigned at ingestion time
    #[serde(default)]
    pub id: Option<String>,
    /// Opaque relevance score; higher means more similar
    pub score: f32,
    /// Metadata stored alongside the vector at ingestion time
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Match {
    /// The `text` metadata field, when present and a string.
    ///
    /// Index records are written out-of-band, so a record without a usable
    /// `text` field is possible; callers decide how to handle it.
    pub fn text(&self) -> Option<&str> {
        self.metadata.get("text").and_then(|v| v.as_str())
    }
}

/// Trait for a vector index supporting top-k nearest-neighbor queries.
///
/// The index is assumed pre-populated out-of-band; this client only reads.
/// Matches come back sorted by descending similarity; that ordering is
/// part of the index's contract and is not re-verified here.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Query for the `top_k` nearest neighbors of `vector`.
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<Match>>;

    /// Name of the index being queried, for logs.
    fn index_name(&self) -> &str;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<Match>,
}

/// Vector index backed by a Pinecone-style HTTP query API.
///
/// Posts `{"vector", "topK", "includeMetadata"}` to `{endpoint}/query` and
/// expects `{"matches": [{"id", "score", "metadata"}, ...]}` back.
#[derive(Clone)]
pub struct HttpVectorIndex {
    config: IndexConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for HttpVectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpVectorIndex")
            .field("endpoint", &self.config.endpoint)
            .field("index_name", &self.config.index_name)
            .finish()
    }
}

impl HttpVectorIndex {
    /// Create a client from a validated configuration.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| IndexError::Http { source: e })?;
        tracing::info!(
            endpoint = %config.endpoint,
            index = %config.index_name,
            "created vector index client"
        );
        Ok(Self { config, client })
    }
}

#[async_trait]
impl VectorIndex for HttpVectorIndex {
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<Match>> {
        if vector.is_empty() {
            return Err(IndexError::invalid_config("query vector must not be empty"));
        }
        if top_k == 0 {
            return Err(IndexError::invalid_config("top_k must be positive"));
        }

        let body = QueryRequest {
            vector,
            top_k,
            include_metadata,
        };

        let mut request = self.client.post(self.config.query_url()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.header("Api-Key", key);
        }

        tracing::debug!(
            index = %self.config.index_name,
            top_k,
            dimension = vector.len(),
            "querying vector index"
        );
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IndexError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| IndexError::malformed(format!("invalid JSON body: {e}")))?;

        tracing::debug!(matches = parsed.matches.len(), "index query complete");
        Ok(parsed.matches)
    }

    fn index_name(&self) -> &str {
        &self.config.index_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_text_extraction() {
        let json = r#"{
            "matches": [
                {"id": "a", "score": 0.91, "metadata": {"text": "Checkout is at 11am."}},
                {"id": "b", "score": 0.80, "metadata": {"source": "policy.pdf"}},
                {"id": "c", "score": 0.75, "metadata": {"text": 42}}
            ]
        }"#;
        let parsed: QueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.matches.len(), 3);
        assert_eq!(parsed.matches[0].text(), Some("Checkout is at 11am."));
        // missing field and non-string field both read as absent
        assert_eq!(parsed.matches[1].text(), None);
        assert_eq!(parsed.matches[2].text(), None);
    }

    #[test]
    fn test_empty_matches_deserialize() {
        let parsed: QueryResponse = serde_json::from_str(r#"{"matches": []}"#).unwrap();
        assert!(parsed.matches.is_empty());
        // some backends omit the field entirely on empty results
        let parsed: QueryResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.matches.is_empty());
    }

    #[test]
    fn test_query_request_wire_names() {
        let body = QueryRequest {
            vector: &[0.5, 0.5],
            top_k: 5,
            include_metadata: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("topK").is_some());
        assert!(json.get("includeMetadata").is_some());
    }
}
