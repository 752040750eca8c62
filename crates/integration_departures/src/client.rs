//! 511 next-departures HTTP client

use std::time::Duration;

use async_trait::async_trait;
use domain::StopCode;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::DepartureFeedConfig;
use crate::error::DepartureFeedError;
use crate::models::FeedDeparture;
use crate::parser::parse_departures_xml;

const NEXT_DEPARTURES_PATH: &str = "GetNextDeparturesByStopCode.aspx";

/// Client trait for fetching real-time departures
#[async_trait]
pub trait DepartureFeedClient: Send + Sync {
    /// Fetch the upcoming departures at a stop
    ///
    /// An empty vector means the feed answered but listed no departures.
    async fn next_departures(
        &self,
        stop_code: StopCode,
    ) -> Result<Vec<FeedDeparture>, DepartureFeedError>;
}

/// HTTP client for the 511 `GetNextDeparturesByStopCode` endpoint
#[derive(Debug)]
pub struct Transit511Client {
    client: Client,
    config: DepartureFeedConfig,
}

impl Transit511Client {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &DepartureFeedConfig) -> Result<Self, DepartureFeedError> {
        config
            .validate()
            .map_err(DepartureFeedError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("busesnearme/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DepartureFeedError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{NEXT_DEPARTURES_PATH}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn map_send_error(&self, e: &reqwest::Error) -> DepartureFeedError {
        if e.is_timeout() {
            DepartureFeedError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            DepartureFeedError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl DepartureFeedClient for Transit511Client {
    #[instrument(skip_all, fields(stop_code = %stop_code))]
    async fn next_departures(
        &self,
        stop_code: StopCode,
    ) -> Result<Vec<FeedDeparture>, DepartureFeedError> {
        let token = self.config.access_token_str().ok_or_else(|| {
            DepartureFeedError::ConfigurationError("access_token must be set".to_string())
        })?;

        debug!(endpoint = %self.endpoint(), "Requesting next departures");

        let stop_code = stop_code.to_string();
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("token", token), ("stopcode", stop_code.as_str())])
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Departures service returned an error status");
            return Err(DepartureFeedError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.map_send_error(&e))?;
        let departures = parse_departures_xml(&body)?;

        debug!(count = departures.len(), "Parsed departures");
        Ok(departures)
    }
}
