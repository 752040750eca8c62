//! Proximity search configuration.

use domain::SearchRadius;
use serde::{Deserialize, Serialize};

/// Defaults applied when a caller does not supply a search radius
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Radius in miles (default: 1.0)
    #[serde(default = "default_radius_miles")]
    pub default_radius_miles: f64,
}

const fn default_radius_miles() -> f64 {
    SearchRadius::DEFAULT_MILES
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_miles: default_radius_miles(),
        }
    }
}

impl SearchConfig {
    /// The configured default radius
    ///
    /// # Errors
    ///
    /// Returns an error if the configured value is not a positive finite number.
    pub fn default_radius(&self) -> Result<SearchRadius, String> {
        SearchRadius::new(self.default_radius_miles).map_err(|e| e.to_string())
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        self.default_radius()
            .map(|_| ())
            .map_err(|e| format!("search.default_radius_miles: {e}"))
    }
}
