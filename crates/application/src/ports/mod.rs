//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod departure_feed_port;
mod stop_catalog_port;

#[cfg(test)]
pub use departure_feed_port::MockDepartureFeedPort;
pub use departure_feed_port::DepartureFeedPort;
#[cfg(test)]
pub use stop_catalog_port::MockStopCatalogPort;
pub use stop_catalog_port::StopCatalogPort;
