//! Stop catalog port
//!
//! Read-only access to the stored stop records. Adapters answer coordinate
//! range queries; exact distance filtering happens in the application layer.

use async_trait::async_trait;
use domain::{BoundingBox, Stop, StopCode};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for querying the stop catalog
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StopCatalogPort: Send + Sync {
    /// All stops whose latitude and longitude fall inside `bounds` (edges included),
    /// in the catalog's own iteration order
    async fn stops_within(&self, bounds: &BoundingBox) -> Result<Vec<Stop>, ApplicationError>;

    /// Look up a single stop by its agency stop code
    async fn find_by_stop_code(&self, code: StopCode) -> Result<Option<Stop>, ApplicationError>;
}
