//! Application configuration
//!
//! Split into focused sub-modules:
//! - `database`: SQLite stop catalog settings
//! - `departures`: real-time departures feed and fan-out limit
//! - `search`: proximity search defaults
//!
//! Logging settings live next to the subscriber in [`crate::telemetry`].

mod database;
mod departures;
mod search;

use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use departures::DeparturesAppConfig;
pub use search::SearchConfig;

use crate::telemetry::TelemetryConfig;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "BUSESNEARME";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Stop catalog database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Real-time departures configuration
    #[serde(default)]
    pub departures: DeparturesAppConfig,

    /// Proximity search configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Sources, lowest precedence first: built-in defaults, a `config.*` file
    /// in the working directory (if present), then `BUSESNEARME_*` variables
    /// with `__` between nested keys (e.g. `BUSESNEARME_DEPARTURES__ACCESS_TOKEN`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = Self::defaults()?
            .add_source(config::File::with_name("config").required(false))
            .add_source(Self::environment());

        builder.build()?.try_deserialize()
    }

    /// Load configuration from a TOML document, still honoring environment
    /// overrides
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        let builder = Self::defaults()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .add_source(Self::environment());

        builder.build()?.try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        config::Config::builder()
            .set_default("database.path", "stops.db")?
            .set_default("search.default_radius_miles", 1.0)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Validate the parts of the configuration that serde cannot check
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.departures.validate()?;
        self.search.validate()?;
        if self.database.max_connections == 0 {
            return Err("database.max_connections must be greater than 0".to_string());
        }
        Ok(())
    }
}
