//! Domain layer for busesnearme
//!
//! Contains the stop and departure records, the geographic value objects used
//! by proximity search, and the distance metric abstraction. This layer has
//! no I/O and defines the ubiquitous language.

pub mod distance;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use distance::{DistanceMetric, HaversineDistance, PlanarDistance};
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
