//! Domain entities - Stop catalog records and departure predictions

mod departure;
mod stop;

pub use departure::DepartureRecord;
pub use stop::{RankedStop, Stop};
