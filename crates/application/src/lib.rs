//! Application layer - Use cases and orchestration
//!
//! Defines the ports the core needs from the outside world (the stop catalog
//! and the real-time departures feed) and the services that search for nearby
//! stops and aggregate their departures.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
