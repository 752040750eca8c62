//! Domain-level errors

use thiserror::Error;

use crate::value_objects::InvalidCoordinates;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the WGS84 range
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),

    /// Search radius that is not a positive, finite number of miles
    #[error("Invalid search radius: {0}")]
    InvalidRadius(f64),

    /// Stop code that is not a non-negative integer
    #[error("Invalid stop code: {0}")]
    InvalidStopCode(String),
}
