//! Distance metrics used to score stops against a search origin
//!
//! Proximity search only depends on [`DistanceMetric`], so a different
//! formula can be plugged in without touching the ranking code.

use std::fmt::Debug;

use crate::value_objects::GeoLocation;

/// Miles per degree used by the planar approximation
pub const MILES_PER_DEGREE: f64 = 69.0;

/// Mean Earth radius in miles
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Computes the distance in miles between two points
pub trait DistanceMetric: Debug + Send + Sync {
    /// Distance in miles from `from` to `to`
    fn distance_miles(&self, from: GeoLocation, to: GeoLocation) -> f64;
}

/// Flat-plane approximation at 69 miles per degree
///
/// Treats latitude and longitude degrees as equal-length axes. Only accurate
/// for short distances away from the poles. This is the metric proximity
/// search uses unless another one is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarDistance;

impl DistanceMetric for PlanarDistance {
    // Must stay sqrt(dlat² + dlon²); `hypot` rounds differently at the radius boundary
    #[allow(clippy::suboptimal_flops)]
    fn distance_miles(&self, from: GeoLocation, to: GeoLocation) -> f64 {
        let dlat = to.latitude() - from.latitude();
        let dlon = to.longitude() - from.longitude();
        MILES_PER_DEGREE * (dlat * dlat + dlon * dlon).sqrt()
    }
}

/// Great-circle distance using the Haversine formula
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineDistance;

impl DistanceMetric for HaversineDistance {
    fn distance_miles(&self, from: GeoLocation, to: GeoLocation) -> f64 {
        let lat1_rad = from.latitude().to_radians();
        let lat2_rad = to.latitude().to_radians();
        let delta_lat = (to.latitude() - from.latitude()).to_radians();
        let delta_lon = (to.longitude() - from.longitude()).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        );
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_MILES * c
    }
}
