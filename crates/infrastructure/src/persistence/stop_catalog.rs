//! SQLite stop catalog implementation
//!
//! Implements the `StopCatalogPort` over the `stops` table.

use std::sync::Arc;

use application::{ApplicationError, StopCatalogPort};
use async_trait::async_trait;
use domain::{BoundingBox, Stop, StopCode};
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument, warn};

use super::connection::ConnectionPool;

const SELECT_STOP: &str = "SELECT id, lat, lon, tag, title, stop_id FROM stops";

/// SQLite-based stop catalog
#[derive(Debug, Clone)]
pub struct SqliteStopCatalog {
    pool: Arc<ConnectionPool>,
}

impl SqliteStopCatalog {
    /// Create a new SQLite stop catalog
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Write stops into the catalog, replacing rows with the same `id`
    ///
    /// Used by seeding jobs and tests; queries never mutate the catalog.
    #[instrument(skip_all, fields(count = stops.len()))]
    pub async fn insert_stops(&self, stops: &[Stop]) -> Result<usize, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let stops = stops.to_vec();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(catalog_error)?;
            let tx = conn.transaction().map_err(catalog_error)?;
            {
                let mut stmt = tx
                    .prepare(
                        "INSERT OR REPLACE INTO stops (id, lat, lon, tag, title, stop_id)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    )
                    .map_err(catalog_error)?;
                for stop in &stops {
                    stmt.execute(params![
                        stop.id,
                        stop.lat,
                        stop.lon,
                        stop.tag,
                        stop.title,
                        stop.stop_code.value(),
                    ])
                    .map_err(catalog_error)?;
                }
            }
            tx.commit().map_err(catalog_error)?;

            debug!("Inserted stops");
            Ok(stops.len())
        })
        .await
        .map_err(catalog_error)?
    }
}

#[async_trait]
impl StopCatalogPort for SqliteStopCatalog {
    #[instrument(skip_all, fields(
        min_lat = bounds.min_lat,
        max_lat = bounds.max_lat,
        min_lon = bounds.min_lon,
        max_lon = bounds.max_lon
    ))]
    async fn stops_within(&self, bounds: &BoundingBox) -> Result<Vec<Stop>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let bounds = *bounds;

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(catalog_error)?;

            let mut stmt = conn
                .prepare(&format!(
                    "{SELECT_STOP}
                     WHERE lat BETWEEN ?1 AND ?2 AND lon BETWEEN ?3 AND ?4
                     ORDER BY id"
                ))
                .map_err(catalog_error)?;

            let rows = stmt
                .query_map(
                    params![bounds.min_lat, bounds.max_lat, bounds.min_lon, bounds.max_lon],
                    row_to_stop,
                )
                .map_err(catalog_error)?;

            let mut stops = Vec::new();
            for row in rows {
                match row {
                    Ok(stop) => stops.push(stop),
                    Err(rusqlite::Error::IntegralValueOutOfRange(_, stop_id)) => {
                        warn!(stop_id, "Skipping stop whose code does not fit a stop code");
                    },
                    Err(e) => return Err(catalog_error(e)),
                }
            }

            debug!(count = stops.len(), "Loaded candidate stops");
            Ok(stops)
        })
        .await
        .map_err(catalog_error)?
    }

    #[instrument(skip_all, fields(stop_code = %code))]
    async fn find_by_stop_code(&self, code: StopCode) -> Result<Option<Stop>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(catalog_error)?;

            conn.query_row(
                &format!("{SELECT_STOP} WHERE stop_id = ?1 ORDER BY id LIMIT 1"),
                [code.value()],
                row_to_stop,
            )
            .optional()
            .map_err(catalog_error)
        })
        .await
        .map_err(catalog_error)?
    }
}

fn row_to_stop(row: &Row<'_>) -> rusqlite::Result<Stop> {
    Ok(Stop {
        id: row.get(0)?,
        lat: row.get(1)?,
        lon: row.get(2)?,
        tag: row.get(3)?,
        title: row.get(4)?,
        stop_code: StopCode::new(row.get(5)?),
    })
}

fn catalog_error(e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::CatalogUnavailable(e.to_string())
}
