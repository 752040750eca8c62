//! Departure aggregation across stops
//!
//! Fetches departures one stop at a time from the feed port and contains
//! every failure inside that stop's result: an unreachable, slow or malformed
//! feed yields an empty list for the stop and never an error for the caller.

use std::fmt;
use std::sync::Arc;

use domain::{DepartureRecord, StopCode};
use futures::stream::{self, StreamExt};
use tracing::{debug, instrument, warn};

use crate::ports::DepartureFeedPort;

/// Default upper bound on in-flight feed requests for a batch
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 8;

/// Best-effort departure fetching for one or many stops
#[derive(Clone)]
pub struct DepartureAggregator {
    feed: Arc<dyn DepartureFeedPort>,
    max_concurrent_requests: usize,
}

impl fmt::Debug for DepartureAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepartureAggregator")
            .field("feed", &"<dyn DepartureFeedPort>")
            .field("max_concurrent_requests", &self.max_concurrent_requests)
            .finish()
    }
}

impl DepartureAggregator {
    /// Create an aggregator over `feed`
    #[must_use]
    pub fn new(feed: Arc<dyn DepartureFeedPort>) -> Self {
        Self {
            feed,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }

    /// Set the fan-out limit for batch fetches (at least 1)
    #[must_use]
    pub fn with_max_concurrent_requests(mut self, limit: usize) -> Self {
        self.max_concurrent_requests = limit.max(1);
        self
    }

    /// Current fan-out limit
    #[must_use]
    pub const fn max_concurrent_requests(&self) -> usize {
        self.max_concurrent_requests
    }

    /// Departures at a single stop, or an empty list if the feed fails
    #[instrument(skip_all, fields(stop_code = %stop_code))]
    pub async fn fetch_departures(&self, stop_code: StopCode) -> Vec<DepartureRecord> {
        match self.feed.next_departures(stop_code).await {
            Ok(records) => {
                debug!(count = records.len(), "Fetched departures");
                records
            },
            Err(e) => {
                warn!(error = %e, "Departure feed failed, reporting no departures");
                Vec::new()
            },
        }
    }

    /// Departures for each stop, one list per input code in input order
    ///
    /// Up to `max_concurrent_requests` fetches run at once; a slow stop never
    /// reorders the output.
    #[instrument(skip_all, fields(stops = stop_codes.len()))]
    pub async fn fetch_departures_for_stops(
        &self,
        stop_codes: &[StopCode],
    ) -> Vec<Vec<DepartureRecord>> {
        stream::iter(stop_codes.iter().copied())
            .map(|code| self.fetch_departures(code))
            .buffered(self.max_concurrent_requests)
            .collect()
            .await
    }
}
