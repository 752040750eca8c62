//! Real-time departure predictions

use serde::{Deserialize, Serialize};

use crate::value_objects::StopCode;

/// Upcoming departures of one route direction at a stop
///
/// Built per request from the departures feed and never persisted.
/// `departure_times` is non-empty: routes without upcoming departures are
/// left out rather than reported with an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartureRecord {
    /// The stop code that was queried
    #[serde(rename = "stop_id")]
    pub stop_code: StopCode,
    /// Route name as reported by the feed
    #[serde(rename = "route")]
    pub route_name: Option<String>,
    /// Route direction name as reported by the feed
    pub route_direction: Option<String>,
    /// Stop name as reported by the feed
    #[serde(rename = "name")]
    pub stop_display_name: Option<String>,
    /// Departure times exactly as the agency formats them
    pub departure_times: Vec<String>,
}
