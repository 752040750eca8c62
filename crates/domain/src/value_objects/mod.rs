//! Value Objects - Immutable, identity-less domain primitives

mod bounding_box;
mod geo_location;
mod search_radius;
mod stop_code;

pub use bounding_box::BoundingBox;
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use search_radius::SearchRadius;
pub use stop_code::StopCode;
