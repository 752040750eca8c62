//! Agency stop code value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// External stop code assigned by the transit agency
///
/// This is the code riders see on the stop sign and the one the real-time
/// departures feed is keyed by. It is distinct from the catalog's internal row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopCode(u32);

impl StopCode {
    /// Create a stop code from its numeric value
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Get the numeric value
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StopCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl FromStr for StopCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| DomainError::InvalidStopCode(s.to_string()))
    }
}
