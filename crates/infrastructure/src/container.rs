//! Service wiring
//!
//! Builds the application services from an [`AppConfig`] so that an outer
//! request layer only has to hold one value.

use std::sync::Arc;

use application::{
    ApplicationError, DepartureAggregator, NearbyDeparturesService, ProximitySearch,
};
use domain::SearchRadius;
use tracing::info;

use crate::adapters::DepartureFeedAdapter;
use crate::config::AppConfig;
use crate::persistence::{SqliteStopCatalog, create_pool};

/// Services shared across requests
#[derive(Debug, Clone)]
pub struct AppServices {
    /// Stop catalog, exposed for seeding
    pub catalog: Arc<SqliteStopCatalog>,
    /// Proximity search plus departure aggregation
    pub nearby_departures: Arc<NearbyDeparturesService>,
    /// Radius to use when a request does not name one
    pub default_radius: SearchRadius,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppServices {
    /// Wire the catalog, the departures feed and the services on top of them
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` for invalid settings and
    /// `ApplicationError::CatalogUnavailable` if the database cannot be opened.
    pub fn from_config(config: AppConfig) -> Result<Self, ApplicationError> {
        config.validate().map_err(ApplicationError::Configuration)?;
        let default_radius = config
            .search
            .default_radius()
            .map_err(ApplicationError::Configuration)?;

        let pool = create_pool(&config.database)
            .map_err(|e| ApplicationError::CatalogUnavailable(e.to_string()))?;
        let catalog = Arc::new(SqliteStopCatalog::new(Arc::new(pool)));

        let feed = DepartureFeedAdapter::with_config(&config.departures.to_feed_config())?;
        let aggregator = DepartureAggregator::new(Arc::new(feed))
            .with_max_concurrent_requests(config.departures.max_concurrent_requests);
        let search = ProximitySearch::new(Arc::clone(&catalog) as _);

        info!(
            database = %config.database.path,
            max_concurrent_requests = aggregator.max_concurrent_requests(),
            default_radius = %default_radius,
            "Services initialized"
        );

        Ok(Self {
            catalog,
            nearby_departures: Arc::new(NearbyDeparturesService::new(search, aggregator)),
            default_radius,
            config: Arc::new(config),
        })
    }
}
