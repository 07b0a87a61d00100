//! Domain types for the direction resolver.
//!
//! Stops, route sequences and vehicle arrivals as supplied by the transit
//! data providers. These are plain immutable values; every analysis derives
//! its results from them without retaining any state.

mod error;
mod route;
mod stop;
mod vehicle;

pub use error::DirectionError;
pub use route::{RouteId, RouteStation, TravelDirection};
pub use stop::{Stop, StopId};
pub use vehicle::VehicleArrival;
