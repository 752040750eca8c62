//! Persistence module
//!
//! SQLite-backed stop catalog.

pub mod connection;
pub mod migrations;
pub mod stop_catalog;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use stop_catalog::SqliteStopCatalog;
