//! Real-time departures feed port

use async_trait::async_trait;
use domain::{DepartureRecord, StopCode};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for fetching upcoming departures at a single stop
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DepartureFeedPort: Send + Sync {
    /// Fetch the departure records for one stop code
    ///
    /// Every returned record carries `stop_code` and a non-empty list of
    /// departure times. Unreachable or malformed feeds are reported as errors;
    /// deciding what to do with them is up to the caller.
    async fn next_departures(
        &self,
        stop_code: StopCode,
    ) -> Result<Vec<DepartureRecord>, ApplicationError>;
}
