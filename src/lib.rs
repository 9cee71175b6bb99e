pub mod atomic;
pub mod csv;
pub mod model;
pub mod station;

pub use model::{FuelVariant, Request};
pub use station::{Pump, Station, StationError, Statistics};
