//! Search radius value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Radius of a proximity search, in miles
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SearchRadius(f64);

impl SearchRadius {
    /// Radius used when the caller does not supply one
    pub const DEFAULT_MILES: f64 = 1.0;

    /// Create a validated radius
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRadius` for zero, negative, NaN or infinite values.
    pub fn new(miles: f64) -> Result<Self, DomainError> {
        if miles.is_finite() && miles > 0.0 {
            Ok(Self(miles))
        } else {
            Err(DomainError::InvalidRadius(miles))
        }
    }

    /// Radius in miles
    #[must_use]
    pub const fn miles(&self) -> f64 {
        self.0
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        Self(Self::DEFAULT_MILES)
    }
}

impl TryFrom<f64> for SearchRadius {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SearchRadius> for f64 {
    fn from(radius: SearchRadius) -> Self {
        radius.0
    }
}

impl fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mi", self.0)
    }
}
