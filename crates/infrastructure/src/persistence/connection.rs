//! Stop catalog database pool
//!
//! The catalog lives in a single SQLite file (or `:memory:` for tests) and is
//! shared through an r2d2 pool.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use thiserror::Error;
use tracing::{debug, info};

use super::migrations::run_migrations;
use crate::config::DatabaseConfig;

/// Errors opening or preparing the stop catalog database
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Cannot create catalog directory: {0}")]
    Directory(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Pool of catalog connections
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Open the catalog pool described by `config`, migrating the schema if asked
///
/// Every `:memory:` connection is its own database, so an in-memory catalog
/// gets exactly one pooled connection.
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    info!(path = %config.path, max_connections = config.max_connections, "Opening stop catalog");

    let pool = if config.is_in_memory() {
        Pool::builder()
            .max_size(1)
            .build(SqliteConnectionManager::memory())?
    } else {
        ensure_parent_dir(Path::new(&config.path))?;
        let manager = SqliteConnectionManager::file(&config.path).with_init(apply_pragmas);
        Pool::builder()
            .max_size(config.max_connections)
            .build(manager)?
    };

    if config.run_migrations {
        let conn = pool.get()?;
        run_migrations(&conn)?;
    }

    debug!(max_size = pool.max_size(), "Stop catalog ready");
    Ok(pool)
}

fn ensure_parent_dir(path: &Path) -> Result<(), DatabaseError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(std::fs::create_dir_all(dir)?),
        _ => Ok(()),
    }
}

/// WAL lets range queries run while the catalog is being reseeded
fn apply_pragmas(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA busy_timeout = 5000;",
    )
}
