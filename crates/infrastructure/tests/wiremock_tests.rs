//! End-to-end tests for the wired services
//!
//! Tests cover:
//! - Nearby departures against an in-memory catalog and a mocked 511 feed
//! - Per-stop failure containment (HTTP 503, malformed XML, timeouts)
//! - Result ordering when responses complete out of order

#![allow(clippy::expect_used)]

use std::time::Duration;

use domain::{GeoLocation, SearchRadius, Stop, StopCode};
use infrastructure::{AppConfig, AppServices, DatabaseConfig};
use secrecy::SecretString;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/GetNextDeparturesByStopCode.aspx";

fn departures_xml(route: &str, stop_name: &str, times: &[&str]) -> String {
    let times: String = times
        .iter()
        .map(|t| format!("<DepartureTime>{t}</DepartureTime>"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<RTT><AgencyList><Agency Name="SF-MUNI"><RouteList>
<Route Name="{route}"><RouteDirectionList><RouteDirection Name="Inbound to Downtown">
<StopList><Stop name="{stop_name}"><DepartureTimeList>{times}</DepartureTimeList></Stop></StopList>
</RouteDirection></RouteDirectionList></Route>
</RouteList></Agency></AgencyList></RTT>"#
    )
}

fn stop(id: i64, code: u32, lat: f64, lon: f64) -> Stop {
    Stop {
        id,
        stop_code: StopCode::new(code),
        lat,
        lon,
        tag: String::new(),
        title: format!("Stop {code}"),
    }
}

async fn services_for(server: &MockServer, timeout_secs: u64) -> AppServices {
    let mut config = AppConfig {
        database: DatabaseConfig::in_memory(),
        ..AppConfig::default()
    };
    config.departures.base_url = server.uri();
    config.departures.access_token = Some(SecretString::from("test-token"));
    config.departures.timeout_secs = timeout_secs;

    let services = AppServices::from_config(config).expect("Failed to wire services");
    services
        .catalog
        .insert_stops(&[
            stop(1, 1001, 37.7749, -122.4194),
            stop(2, 1002, 37.7750, -122.4200),
            stop(3, 2000, 40.0, -74.0),
        ])
        .await
        .expect("Failed to seed stops");
    services
}

fn origin() -> GeoLocation {
    GeoLocation::new(37.7749, -122.4194).expect("valid location")
}

async fn mount_stop(server: &MockServer, code: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("token", "test-token"))
        .and(query_param("stopcode", code))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn departures_near_combines_search_and_feed() {
    let server = MockServer::start().await;
    mount_stop(
        &server,
        "1001",
        ResponseTemplate::new(200).set_body_string(departures_xml("38-Geary", "Downtown", &["5 min", "12 min"])),
    )
    .await;
    mount_stop(
        &server,
        "1002",
        ResponseTemplate::new(200).set_body_string(departures_xml("5-Fulton", "Market St", &["3"])),
    )
    .await;

    let services = services_for(&server, 5).await;
    let nearby = services
        .nearby_departures
        .departures_near(origin(), SearchRadius::default())
        .await
        .expect("Search failed");

    assert_eq!(nearby.len(), 2);
    assert_eq!(nearby[0].stop.stop_code(), StopCode::new(1001));
    assert_eq!(nearby[0].departures.len(), 1);
    assert_eq!(nearby[0].departures[0].stop_code, StopCode::new(1001));
    assert_eq!(nearby[0].departures[0].stop_display_name.as_deref(), Some("Downtown"));
    assert_eq!(nearby[0].departures[0].departure_times, vec!["5 min", "12 min"]);

    assert_eq!(nearby[1].stop.stop_code(), StopCode::new(1002));
    assert_eq!(nearby[1].departures[0].route_name.as_deref(), Some("5-Fulton"));
}

#[tokio::test]
async fn failing_stop_is_contained() {
    let server = MockServer::start().await;
    mount_stop(&server, "1001", ResponseTemplate::new(503)).await;
    mount_stop(
        &server,
        "1002",
        ResponseTemplate::new(200).set_body_string(departures_xml("5-Fulton", "Market St", &["3"])),
    )
    .await;

    let services = services_for(&server, 5).await;
    let nearby = services
        .nearby_departures
        .departures_near(origin(), SearchRadius::default())
        .await
        .expect("Feed failures must not fail the search");

    assert_eq!(nearby.len(), 2);
    assert!(nearby[0].departures.is_empty());
    assert_eq!(nearby[1].departures.len(), 1);
}

#[tokio::test]
async fn malformed_and_timed_out_feeds_yield_empty() {
    let server = MockServer::start().await;
    mount_stop(
        &server,
        "1001",
        ResponseTemplate::new(200).set_body_string("<RTT><AgencyList>"),
    )
    .await;
    mount_stop(
        &server,
        "1002",
        ResponseTemplate::new(200)
            .set_body_string(departures_xml("5-Fulton", "Market St", &["3"]))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let services = services_for(&server, 1).await;
    let aggregator = services.nearby_departures.aggregator();
    let results = aggregator
        .fetch_departures_for_stops(&[StopCode::new(1001), StopCode::new(1002)])
        .await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(Vec::is_empty));
}

#[tokio::test]
async fn batch_order_follows_input_not_completion() {
    let server = MockServer::start().await;
    mount_stop(
        &server,
        "1001",
        ResponseTemplate::new(200)
            .set_body_string(departures_xml("A", "First", &["1"]))
            .set_delay(Duration::from_millis(400)),
    )
    .await;
    mount_stop(
        &server,
        "1002",
        ResponseTemplate::new(200)
            .set_body_string(departures_xml("B", "Second", &["2"]))
            .set_delay(Duration::from_millis(200)),
    )
    .await;
    mount_stop(
        &server,
        "2000",
        ResponseTemplate::new(200).set_body_string(departures_xml("C", "Third", &["3"])),
    )
    .await;

    let services = services_for(&server, 5).await;
    let results = services
        .nearby_departures
        .aggregator()
        .fetch_departures_for_stops(&[
            StopCode::new(1001),
            StopCode::new(1002),
            StopCode::new(2000),
        ])
        .await;

    let routes: Vec<Option<&str>> = results
        .iter()
        .map(|r| r[0].route_name.as_deref())
        .collect();
    assert_eq!(routes, vec![Some("A"), Some("B"), Some("C")]);
}

#[tokio::test]
async fn known_stop_lookup_guards_the_feed() {
    let server = MockServer::start().await;
    mount_stop(
        &server,
        "2000",
        ResponseTemplate::new(200).set_body_string(departures_xml("M", "Broad St", &["8"])),
    )
    .await;

    let services = services_for(&server, 5).await;

    let known = services
        .nearby_departures
        .departures_at_known_stop(StopCode::new(2000))
        .await
        .expect("Lookup failed")
        .expect("Stop 2000 is in the catalog");
    assert_eq!(known.len(), 1);
    assert_eq!(known[0].departure_times, vec!["8"]);

    let unknown = services
        .nearby_departures
        .departures_at_known_stop(StopCode::new(4242))
        .await
        .expect("Lookup failed");
    assert!(unknown.is_none());

    let received = server.received_requests().await.unwrap_or_default();
    assert!(
        received
            .iter()
            .all(|r| !r.url.query().unwrap_or_default().contains("4242"))
    );
}
