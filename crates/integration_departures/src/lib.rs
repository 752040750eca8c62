//! Real-time departures integration for busesnearme
//!
//! Fetches upcoming departures for a stop code from a
//! [511.org](https://511.org/open-data/transit)-style `GetNextDeparturesByStopCode`
//! endpoint and flattens its nested XML answer into one [`FeedDeparture`] per
//! route direction that has departures scheduled.
//!
//! # Architecture
//!
//! [`DepartureFeedClient`] defines the interface, implemented by
//! [`Transit511Client`] over `reqwest`. The XML walk lives in
//! [`parse_departures_xml`] so it can be exercised without a network.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::StopCode;
//! use integration_departures::{DepartureFeedClient, DepartureFeedConfig, Transit511Client};
//!
//! let config = DepartureFeedConfig::with_token("my-511-token");
//! let client = Transit511Client::new(&config)?;
//!
//! let departures = client.next_departures(StopCode::new(13565)).await?;
//! ```

mod client;
mod config;
mod error;
mod models;
mod parser;

pub use client::{DepartureFeedClient, Transit511Client};
pub use config::DepartureFeedConfig;
pub use error::DepartureFeedError;
pub use models::FeedDeparture;
pub use parser::parse_departures_xml;
