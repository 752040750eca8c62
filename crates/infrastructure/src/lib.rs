//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the SQLite stop
//! catalog and the real-time departures feed. Also owns configuration
//! loading and logging setup.

pub mod adapters;
pub mod config;
pub mod container;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, DatabaseConfig, DeparturesAppConfig, SearchConfig};
pub use container::AppServices;
pub use persistence::{ConnectionPool, DatabaseError, SqliteStopCatalog, create_pool};
pub use telemetry::{TelemetryConfig, TelemetryError, init_tracing};
