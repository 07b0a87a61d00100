//! Transit data providers.
//!
//! The direction engine itself never performs I/O. Screening pulls stops,
//! arrival boards and route sequences through [`TransitProvider`], which a
//! caller implements over whatever feed it has (a public bus API, a GTFS
//! snapshot, a test fixture).

mod cache;
mod memory;

use std::sync::Arc;

use crate::domain::{RouteId, RouteStation, Stop, StopId, VehicleArrival};

pub use cache::{CacheConfig, CachedProvider};
pub use memory::StaticProvider;

/// Errors from a transit data provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The requested stop is unknown to the provider.
    #[error("stop not found: {0}")]
    StopNotFound(StopId),

    /// The requested route is unknown to the provider.
    #[error("route not found: {0}")]
    RouteNotFound(RouteId),

    /// The upstream feed failed (network error, bad response, rate limit).
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Source of stops, live arrivals and route sequences.
#[allow(async_fn_in_trait)]
pub trait TransitProvider {
    /// Look up a stop by identifier.
    async fn stop(&self, id: &StopId) -> Result<Stop, ProviderError>;

    /// Vehicles currently approaching `stop`.
    async fn arrivals(&self, stop: &StopId) -> Result<Vec<VehicleArrival>, ProviderError>;

    /// The ordered station sequence of `route`.
    async fn route_stations(
        &self,
        route: &RouteId,
    ) -> Result<Arc<Vec<RouteStation>>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            ProviderError::StopNotFound(StopId::from("CJB283000123")).to_string(),
            "stop not found: CJB283000123"
        );
        assert_eq!(
            ProviderError::RouteNotFound(RouteId::from("CJB270001000")).to_string(),
            "route not found: CJB270001000"
        );
        assert_eq!(
            ProviderError::Unavailable("timed out".into()).to_string(),
            "provider unavailable: timed out"
        );
    }
}
