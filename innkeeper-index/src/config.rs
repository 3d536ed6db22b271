//! Configuration for the vector index client

use crate::error::{IndexError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-call timeout applied to every index query.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a vector index endpoint.
///
/// Constructed once at startup and handed to
/// [`HttpVectorIndex`](crate::client::HttpVectorIndex).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Base URL of the index service, without a trailing slash
    pub endpoint: String,
    /// Name of the index to query (e.g. "bookings")
    pub index_name: String,
    /// Optional API key sent as the `Api-Key` header
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

impl IndexConfig {
    /// Create a configuration for the given endpoint and index.
    pub fn new(endpoint: impl Into<String>, index_name: impl Into<String>) -> Self {
        let mut endpoint = endpoint.into();
        while endpoint.ends_with('/') {
            endpoint.pop();
        }
        Self {
            endpoint,
            index_name: index_name.into(),
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
            return Err(IndexError::invalid_config("endpoint must not be empty"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(IndexError::invalid_config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.index_name.trim().is_empty() {
            return Err(IndexError::invalid_config("index name must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(IndexError::invalid_config("timeout must be non-zero"));
        }
        Ok(())
    }

    /// Full URL of the query operation.
    pub fn query_url(&self) -> String {
        format!("{}/query", self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = IndexConfig::new("https://bookings.internal:6333/", "bookings");
        assert_eq!(config.endpoint, "https://bookings.internal:6333");
        assert_eq!(config.query_url(), "https://bookings.internal:6333/query");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        config.validate().unwrap();
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(IndexConfig::new("", "bookings").validate().is_err());
        assert!(IndexConfig::new("ftp://x", "bookings").validate().is_err());
        assert!(IndexConfig::new("http://x", "").validate().is_err());
    }
}
