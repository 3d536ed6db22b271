//! Configuration for the embedding service client

use crate::error::{EmbedError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-call timeout applied to every embedding request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an embedding service endpoint.
///
/// Constructed once at startup and handed to
/// [`HttpEmbedProvider`](crate::provider::HttpEmbedProvider); there is no
/// implicit re-initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Base URL of the embedding service, without a trailing slash
    pub endpoint: String,
    /// Identifier of the embedding model the service should use
    pub model: String,
    /// Optional bearer token sent with every request
    pub api_key: Option<String>,
    /// Per-call timeout; a slow service fails the call instead of hanging it
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

impl EmbedConfig {
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

    /// Set the bearer token sent with every request.
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
            return Err(EmbedError::invalid_config("endpoint must not be empty"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(EmbedError::invalid_config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.model.trim().is_empty() {
            return Err(EmbedError::invalid_config("model must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(EmbedError::invalid_config("timeout must be non-zero"));
        }
        Ok(())
    }

    /// Full URL of the embed operation.
    pub fn embed_url(&self) -> String {
        format!("{}/embed", self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = EmbedConfig::new("http://localhost:8080", "all-mpnet-base-v2");
        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.model, "all-mpnet-base-v2");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.api_key.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = EmbedConfig::new("http://localhost:8080/", "m");
        assert_eq!(config.embed_url(), "http://localhost:8080/embed");
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(EmbedConfig::new("", "m").validate().is_err());
        assert!(EmbedConfig::new("localhost:8080", "m").validate().is_err());
        assert!(EmbedConfig::new("http://localhost", " ").validate().is_err());
        assert!(
            EmbedConfig::new("http://localhost", "m")
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }
}
