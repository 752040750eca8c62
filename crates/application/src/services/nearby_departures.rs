//! Nearby departures use case
//!
//! Combines proximity search with departure aggregation: find the stops
//! around a point, then fetch live departures for each of them.

use domain::{DepartureRecord, GeoLocation, RankedStop, SearchRadius, StopCode};
use serde::Serialize;
use tracing::{debug, instrument};

use super::{DepartureAggregator, ProximitySearch};
use crate::error::ApplicationError;

/// A ranked stop together with its upcoming departures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyStopDepartures {
    /// The stop and its distance from the search origin
    pub stop: RankedStop,
    /// Departures at the stop (empty if none are scheduled or the feed failed)
    pub departures: Vec<DepartureRecord>,
}

/// Service answering "what leaves near here, and when"
#[derive(Debug, Clone)]
pub struct NearbyDeparturesService {
    search: ProximitySearch,
    aggregator: DepartureAggregator,
}

impl NearbyDeparturesService {
    /// Create the service from its two components
    #[must_use]
    pub const fn new(search: ProximitySearch, aggregator: DepartureAggregator) -> Self {
        Self { search, aggregator }
    }

    /// Departure aggregation component
    #[must_use]
    pub const fn aggregator(&self) -> &DepartureAggregator {
        &self.aggregator
    }

    /// Departures for every stop within `radius` of `origin`, nearest stop first
    ///
    /// Catalog failures propagate. Feed failures only empty the affected stop's list.
    #[instrument(skip_all, fields(origin = %origin, radius = %radius))]
    pub async fn departures_near(
        &self,
        origin: GeoLocation,
        radius: SearchRadius,
    ) -> Result<Vec<NearbyStopDepartures>, ApplicationError> {
        let stops = self.search.find_near(origin, radius).await?;
        if stops.is_empty() {
            debug!("No stops nearby");
            return Ok(Vec::new());
        }

        let codes: Vec<StopCode> = stops.iter().map(RankedStop::stop_code).collect();
        let departures = self.aggregator.fetch_departures_for_stops(&codes).await;

        Ok(stops
            .into_iter()
            .zip(departures)
            .map(|(stop, departures)| NearbyStopDepartures { stop, departures })
            .collect())
    }

    /// Departures at a stop known to the catalog
    ///
    /// Returns `Ok(None)` when the catalog has no stop with this code, so the
    /// feed is never asked about codes outside the catalog.
    #[instrument(skip(self))]
    pub async fn departures_at_known_stop(
        &self,
        code: StopCode,
    ) -> Result<Option<Vec<DepartureRecord>>, ApplicationError> {
        let Some(stop) = self.search.stop_by_code(code).await? else {
            debug!("Stop code not in catalog");
            return Ok(None);
        };

        Ok(Some(self.aggregator.fetch_departures(stop.stop_code).await))
    }
}
