//! Generative model client
//!
//! Stateless single-turn completion: each call sends one prompt and reads
//! back one answer. No system prompt, no conversation memory, no streaming.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-call timeout for generation requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Error type for generative model calls.
///
/// Callers inside this crate never surface these past the answer
/// boundary; they become the `"An error occurred: {e}"` answer text.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The client configuration is invalid
    #[error("Invalid generation configuration: {message}")]
    InvalidConfig { message: String },

    /// The HTTP request itself failed (connect, timeout, TLS, ...)
    #[error("Generation request failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status (quota, content
    /// policy rejection, ...)
    #[error("Generative model service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// The service answered 2xx but produced no usable text
    #[error("Malformed generation response: {message}")]
    MalformedResponse { message: String },
}

impl GenerateError {
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

/// Trait for a generative model that completes a single prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model identifier, for logs.
    fn model_name(&self) -> &str;
}

/// Configuration for a Gemini-style generateContent endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Base URL of the service, without a trailing slash
    pub endpoint: String,
    /// Model identifier (e.g. "gemini-1.5-flash")
    pub model: String,
    /// API key passed as the `key` query parameter
    pub api_key: Option<String>,
    /// Per-call timeout
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}

impl GenerateConfig {
    /// Create a configuration for the given endpoint and model.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let mut endpoint = endpoint.into();
        while endpoint.ends_with('/') {
            endpoint.pop();
        }
        Self {
            endpoint,
            model: model.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the API key sent with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the configuration before any request is sent.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(GenerateError::invalid_config("endpoint must not be empty"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(GenerateError::invalid_config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.model.trim().is_empty() {
            return Err(GenerateError::invalid_config("model must not be empty"));
        }
        Ok(())
    }

    /// Full URL of the generateContent operation.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Generative model client backed by a Gemini-style REST API.
#[derive(Clone)]
pub struct HttpGenerator {
    config: GenerateConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for HttpGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGenerator")
            .field("endpoint", &self.config.endpoint)
            .field("model", &self.config.model)
            .finish()
    }
}

impl HttpGenerator {
    /// Create a client from a validated configuration.
    pub fn new(config: GenerateConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerateError::Http { source: e })?;
        tracing::info!(
            endpoint = %config.endpoint,
            model = %config.model,
            "created generative model client"
        );
        Ok(Self { config, client })
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let mut request = self.client.post(self.config.generate_url()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.query(&[("key", key)]);
        }

        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "generating answer");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerateError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::malformed(format!("invalid JSON body: {e}")))?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GenerateError::malformed("response contained no candidates"))?;

        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect();
        if text.is_empty() {
            return Err(GenerateError::malformed("candidate contained no text"));
        }

        tracing::debug!(answer_len = text.len(), "generation complete");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url() {
        let config = GenerateConfig::new(
            "https://generativelanguage.googleapis.com/",
            "gemini-1.5-flash",
        );
        assert_eq!(
            config.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_response_text_concatenation() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Checkout "}, {"text": "is at 11am."}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        let text: String = parsed.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(text, "Checkout is at 11am.");
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(GenerateConfig::new("", "m").validate().is_err());
        assert!(GenerateConfig::new("http://x", "").validate().is_err());
    }

    #[test]
    fn test_timeout_default_and_override() {
        let config = GenerateConfig::new("http://x", "m");
        assert_eq!(config.timeout, Duration::from_secs(30));

        let config = config.with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
