//! Departure feed adapter - Implements DepartureFeedPort using integration_departures

use std::sync::Arc;

use application::{ApplicationError, DepartureFeedPort};
use async_trait::async_trait;
use domain::{DepartureRecord, StopCode};
use integration_departures::{
    DepartureFeedClient, DepartureFeedConfig, DepartureFeedError, FeedDeparture, Transit511Client,
};
use tracing::{debug, instrument};

/// Adapter for the real-time departures feed
pub struct DepartureFeedAdapter {
    client: Arc<dyn DepartureFeedClient>,
}

impl std::fmt::Debug for DepartureFeedAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepartureFeedAdapter")
            .field("client", &"<dyn DepartureFeedClient>")
            .finish()
    }
}

impl DepartureFeedAdapter {
    /// Wrap an existing feed client
    #[must_use]
    pub fn new(client: Arc<dyn DepartureFeedClient>) -> Self {
        Self { client }
    }

    /// Create an adapter backed by the 511 HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn with_config(config: &DepartureFeedConfig) -> Result<Self, ApplicationError> {
        let client = Transit511Client::new(config).map_err(map_error)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Attach the queried stop code to a feed entry
    fn to_record(stop_code: StopCode, departure: FeedDeparture) -> DepartureRecord {
        DepartureRecord {
            stop_code,
            route_name: departure.route_name,
            route_direction: departure.route_direction,
            stop_display_name: departure.stop_name,
            departure_times: departure.departure_times,
        }
    }
}

fn map_error(e: DepartureFeedError) -> ApplicationError {
    match e {
        DepartureFeedError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        other => ApplicationError::ExternalService(format!("Departures feed: {other}")),
    }
}

#[async_trait]
impl DepartureFeedPort for DepartureFeedAdapter {
    #[instrument(skip_all, fields(stop_code = %stop_code))]
    async fn next_departures(
        &self,
        stop_code: StopCode,
    ) -> Result<Vec<DepartureRecord>, ApplicationError> {
        let departures = self
            .client
            .next_departures(stop_code)
            .await
            .map_err(map_error)?;

        debug!(count = departures.len(), "Fetched departures");

        Ok(departures
            .into_iter()
            .filter(|d| !d.departure_times.is_empty())
            .map(|d| Self::to_record(stop_code, d))
            .collect())
    }
}
