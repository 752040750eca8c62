//! Departure feed data models

use serde::{Deserialize, Serialize};

/// Upcoming departures for one route direction, as reported by the feed
///
/// The feed answers for a single queried stop code, so the code itself is not
/// part of the model; callers attach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDeparture {
    /// `name` attribute of the `Route` element
    pub route_name: Option<String>,
    /// `name` attribute of the `RouteDirection` element
    pub route_direction: Option<String>,
    /// `name` attribute of the `Stop` element
    pub stop_name: Option<String>,
    /// Text of each `DepartureTime` element, in document order
    pub departure_times: Vec<String>,
}
