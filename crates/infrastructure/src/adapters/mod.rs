//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod departure_feed_adapter;

pub use departure_feed_adapter::DepartureFeedAdapter;
