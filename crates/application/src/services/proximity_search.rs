//! Proximity search over the stop catalog
//!
//! Two passes: a cheap rectangular range query against the catalog, then an
//! exact distance check that prunes the rectangle's corners and ranks the
//! survivors nearest first.

use std::fmt;
use std::sync::Arc;

use domain::{
    BoundingBox, DistanceMetric, GeoLocation, PlanarDistance, RankedStop, SearchRadius, Stop,
    StopCode,
};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::StopCatalogPort;

/// Finds catalog stops within a radius of a point
#[derive(Clone)]
pub struct ProximitySearch {
    catalog: Arc<dyn StopCatalogPort>,
    metric: Arc<dyn DistanceMetric>,
}

impl fmt::Debug for ProximitySearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProximitySearch")
            .field("catalog", &"<dyn StopCatalogPort>")
            .field("metric", &self.metric)
            .finish()
    }
}

impl ProximitySearch {
    /// Create a search over `catalog` using the planar distance approximation
    #[must_use]
    pub fn new(catalog: Arc<dyn StopCatalogPort>) -> Self {
        Self {
            catalog,
            metric: Arc::new(PlanarDistance),
        }
    }

    /// Replace the distance metric
    #[must_use]
    pub fn with_metric(mut self, metric: Arc<dyn DistanceMetric>) -> Self {
        self.metric = metric;
        self
    }

    /// Stops strictly closer than `radius` to `origin`, nearest first
    ///
    /// Stops at equal distance keep the order the catalog returned them in.
    /// An empty result is not an error; only catalog failures are.
    #[instrument(skip_all, fields(origin = %origin, radius = %radius))]
    pub async fn find_near(
        &self,
        origin: GeoLocation,
        radius: SearchRadius,
    ) -> Result<Vec<RankedStop>, ApplicationError> {
        let bounds = BoundingBox::around(origin, radius);
        let candidates = self
            .catalog
            .stops_within(&bounds)
            .await
            .map_err(into_catalog_unavailable)?;

        let candidate_count = candidates.len();
        let ranked = rank_candidates(self.metric.as_ref(), origin, radius, candidates);

        debug!(
            candidates = candidate_count,
            matched = ranked.len(),
            "Proximity search complete"
        );
        Ok(ranked)
    }

    /// Look up a stop by its agency stop code
    #[instrument(skip(self))]
    pub async fn stop_by_code(&self, code: StopCode) -> Result<Option<Stop>, ApplicationError> {
        self.catalog
            .find_by_stop_code(code)
            .await
            .map_err(into_catalog_unavailable)
    }
}

/// Score candidates, drop those at or beyond the radius, and sort ascending
fn rank_candidates(
    metric: &dyn DistanceMetric,
    origin: GeoLocation,
    radius: SearchRadius,
    candidates: Vec<Stop>,
) -> Vec<RankedStop> {
    let mut ranked: Vec<RankedStop> = candidates
        .into_iter()
        .filter_map(|stop| {
            let distance = metric.distance_miles(origin, stop.location());
            (distance < radius.miles()).then_some(RankedStop { stop, distance })
        })
        .collect();

    // sort_by is stable, so ties stay in catalog order
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}

fn into_catalog_unavailable(err: ApplicationError) -> ApplicationError {
    match err {
        ApplicationError::CatalogUnavailable(_) => err,
        other => ApplicationError::CatalogUnavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockStopCatalogPort;
    use domain::HaversineDistance;

    fn stop(id: i64, code: u32, lat: f64, lon: f64) -> Stop {
        Stop {
            id,
            stop_code: StopCode::new(code),
            lat,
            lon,
            tag: format!("tag-{id}"),
            title: format!("Stop {code}"),
        }
    }

    fn origin() -> GeoLocation {
        GeoLocation::new(37.7749, -122.4194).unwrap()
    }

    fn one_mile() -> SearchRadius {
        SearchRadius::new(1.0).unwrap()
    }

    #[tokio::test]
    async fn finds_nearby_stops_nearest_first() {
        let mut catalog = MockStopCatalogPort::new();
        catalog.expect_stops_within().returning(|bounds| {
            let all = vec![
                stop(3, 2000, 40.0, -74.0),
                stop(2, 1002, 37.7750, -122.4200),
                stop(1, 1001, 37.7749, -122.4194),
            ];
            Ok(all
                .into_iter()
                .filter(|s| bounds.contains(s.lat, s.lon))
                .collect())
        });

        let search = ProximitySearch::new(Arc::new(catalog));
        let result = search.find_near(origin(), one_mile()).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].stop_code(), StopCode::new(1001));
        assert!(result[0].distance.abs() < 1e-9);
        assert_eq!(result[1].stop_code(), StopCode::new(1002));
        assert!((result[1].distance - 0.042).abs() < 0.005);
    }

    #[tokio::test]
    async fn queries_catalog_with_radius_sized_box() {
        let mut catalog = MockStopCatalogPort::new();
        catalog
            .expect_stops_within()
            .withf(|bounds| {
                (bounds.min_lat - 36.7749).abs() < 1e-9
                    && (bounds.max_lat - 38.7749).abs() < 1e-9
                    && (bounds.min_lon + 123.4194).abs() < 1e-9
                    && (bounds.max_lon + 121.4194).abs() < 1e-9
            })
            .times(1)
            .returning(|_| Ok(vec![]));

        let search = ProximitySearch::new(Arc::new(catalog));
        let result = search.find_near(origin(), one_mile()).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn prunes_bounding_box_corners() {
        // Inside the prefilter rectangle but ~13.8 miles away
        let corner = stop(1, 5, 37.7749 + 0.1414, -122.4194 + 0.1414);
        let mut catalog = MockStopCatalogPort::new();
        catalog
            .expect_stops_within()
            .returning(move |_| Ok(vec![corner.clone()]));

        let search = ProximitySearch::new(Arc::new(catalog));
        let result = search.find_near(origin(), one_mile()).await.unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn boundary_distance_is_excluded() {
        let origin = GeoLocation::new(0.0, 0.0).unwrap();
        // Exactly 69 miles north at one degree
        let candidates = vec![stop(1, 1, 1.0, 0.0)];
        let radius = SearchRadius::new(69.0).unwrap();
        let ranked = rank_candidates(&PlanarDistance, origin, radius, candidates);
        assert!(ranked.is_empty());
    }

    #[test]
    fn equal_distances_keep_catalog_order() {
        let origin = GeoLocation::new(0.0, 0.0).unwrap();
        let candidates = vec![
            stop(10, 10, 0.001, 0.0),
            stop(11, 11, 0.0, 0.001),
            stop(12, 12, -0.001, 0.0),
            stop(13, 13, 0.0, 0.0),
        ];
        let ranked = rank_candidates(&PlanarDistance, origin, one_mile(), candidates);
        let codes: Vec<u32> = ranked.iter().map(|r| r.stop_code().value()).collect();
        assert_eq!(codes, vec![13, 10, 11, 12]);
    }

    #[tokio::test]
    async fn find_near_uses_configured_metric() {
        let origin = GeoLocation::new(60.0, 0.0).unwrap();
        // 0.02 degrees of longitude at 60N: ~1.38 mi planar, ~0.69 mi great-circle
        let catalog = || {
            let mut catalog = MockStopCatalogPort::new();
            catalog
                .expect_stops_within()
                .returning(|_| Ok(vec![stop(1, 1, 60.0, 0.02)]));
            Arc::new(catalog)
        };

        let planar = ProximitySearch::new(catalog());
        assert!(planar.find_near(origin, one_mile()).await.unwrap().is_empty());

        let haversine = ProximitySearch::new(catalog()).with_metric(Arc::new(HaversineDistance));
        let ranked = haversine.find_near(origin, one_mile()).await.unwrap();
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].distance - 0.69).abs() < 0.01);
    }

    #[tokio::test]
    async fn catalog_error_surfaces_as_unavailable() {
        let mut catalog = MockStopCatalogPort::new();
        catalog
            .expect_stops_within()
            .returning(|_| Err(ApplicationError::ExternalService("disk I/O error".to_string())));

        let search = ProximitySearch::new(Arc::new(catalog));
        let err = search.find_near(origin(), one_mile()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::CatalogUnavailable(ref msg) if msg.contains("disk I/O")));
    }

    #[tokio::test]
    async fn empty_catalog_is_empty_result() {
        let mut catalog = MockStopCatalogPort::new();
        catalog.expect_stops_within().returning(|_| Ok(vec![]));

        let search = ProximitySearch::new(Arc::new(catalog));
        assert!(search.find_near(origin(), one_mile()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stop_by_code_delegates_to_catalog() {
        let mut catalog = MockStopCatalogPort::new();
        catalog
            .expect_find_by_stop_code()
            .withf(|code| *code == StopCode::new(1001))
            .returning(|_| Ok(Some(stop(1, 1001, 37.7749, -122.4194))));

        let search = ProximitySearch::new(Arc::new(catalog));
        let found = search.stop_by_code(StopCode::new(1001)).await.unwrap();
        assert_eq!(found.map(|s| s.id), Some(1));
    }
}
