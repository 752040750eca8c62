//! Application services - Use case implementations

mod departure_aggregator;
mod nearby_departures;
mod proximity_search;

pub use departure_aggregator::{DEFAULT_MAX_CONCURRENT_REQUESTS, DepartureAggregator};
pub use nearby_departures::{NearbyDeparturesService, NearbyStopDepartures};
pub use proximity_search::ProximitySearch;
