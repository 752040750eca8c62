//! Real-time departures configuration.

use application::DEFAULT_MAX_CONCURRENT_REQUESTS;
use integration_departures::DepartureFeedConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Departures feed settings plus the aggregator fan-out limit
#[derive(Clone, Serialize, Deserialize)]
pub struct DeparturesAppConfig {
    /// Base URL of the departures API (default: 511.org Transit2.0)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 511 API token (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub access_token: Option<SecretString>,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of feed requests in flight during a batch fetch (default: 8)
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

impl std::fmt::Debug for DeparturesAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeparturesAppConfig")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("max_concurrent_requests", &self.max_concurrent_requests)
            .finish()
    }
}

fn default_base_url() -> String {
    DepartureFeedConfig::default().base_url
}

fn default_timeout_secs() -> u64 {
    DepartureFeedConfig::default().timeout_secs
}

const fn default_max_concurrent_requests() -> usize {
    DEFAULT_MAX_CONCURRENT_REQUESTS
}

impl Default for DeparturesAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            timeout_secs: default_timeout_secs(),
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}

impl DeparturesAppConfig {
    /// Convert to `integration_departures::DepartureFeedConfig`
    #[must_use]
    pub fn to_feed_config(&self) -> DepartureFeedConfig {
        DepartureFeedConfig {
            base_url: self.base_url.clone(),
            access_token: self.access_token.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        self.to_feed_config()
            .validate()
            .map_err(|e| format!("departures: {e}"))?;
        if self.max_concurrent_requests == 0 {
            return Err("departures.max_concurrent_requests must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_token() -> DeparturesAppConfig {
        DeparturesAppConfig {
            access_token: Some(SecretString::from("token")),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_match_feed_defaults() {
        let config = DeparturesAppConfig::default();
        let feed = DepartureFeedConfig::default();
        assert_eq!(config.base_url, feed.base_url);
        assert_eq!(config.timeout_secs, feed.timeout_secs);
        assert_eq!(config.max_concurrent_requests, 8);
    }

    #[test]
    fn to_feed_config_carries_token() {
        let feed = with_token().to_feed_config();
        assert_eq!(feed.access_token_str(), Some("token"));
        assert!(feed.validate().is_ok());
    }

    #[test]
    fn zero_fan_out_is_rejected() {
        let config = DeparturesAppConfig {
            max_concurrent_requests: 0,
            ..with_token()
        };
        assert!(config.validate().unwrap_err().contains("max_concurrent_requests"));
    }

    #[test]
    fn valid_config_passes() {
        assert!(with_token().validate().is_ok());
    }
}
