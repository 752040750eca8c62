//! Transit stop records

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoLocation, StopCode};

/// A boarding location from the stop catalog
///
/// Catalog rows are seeded offline and are read-only at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Internal catalog key
    pub id: i64,
    /// Agency stop code, serialized as `stop_id`
    #[serde(rename = "stop_id")]
    pub stop_code: StopCode,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Agency route tag
    pub tag: String,
    /// Display name
    pub title: String,
}

impl Stop {
    /// Position of the stop
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        GeoLocation::new_unchecked(self.lat, self.lon)
    }
}

/// A stop annotated with its distance from a search origin
///
/// Only exists inside a single proximity search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStop {
    /// The catalog record
    #[serde(flatten)]
    pub stop: Stop,
    /// Distance from the search origin in miles
    pub distance: f64,
}

impl RankedStop {
    /// Agency stop code of the ranked stop
    #[must_use]
    pub const fn stop_code(&self) -> StopCode {
        self.stop.stop_code
    }
}
