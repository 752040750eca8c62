//! Rectangular coordinate range used to prefilter catalog queries

use serde::{Deserialize, Serialize};

use super::{GeoLocation, SearchRadius};

/// An axis-aligned latitude/longitude rectangle
///
/// Bounds are inclusive on both ends, matching a SQL `BETWEEN` range query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southern edge in degrees
    pub min_lat: f64,
    /// Northern edge in degrees
    pub max_lat: f64,
    /// Western edge in degrees
    pub min_lon: f64,
    /// Eastern edge in degrees
    pub max_lon: f64,
}

impl BoundingBox {
    /// Box extending `radius` in every direction from `origin`
    ///
    /// The radius value is applied directly in degrees, so for any radius in
    /// miles the box is far larger than the search circle. It only has to be
    /// over-inclusive; exact filtering happens afterwards.
    #[must_use]
    pub fn around(origin: GeoLocation, radius: SearchRadius) -> Self {
        let r = radius.miles();
        Self {
            min_lat: origin.latitude() - r,
            max_lat: origin.latitude() + r,
            min_lon: origin.longitude() - r,
            max_lon: origin.longitude() + r,
        }
    }

    /// Whether a point lies inside the box (edges included)
    #[must_use]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}
