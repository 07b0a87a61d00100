//! In-memory provider.
//!
//! Serves fixed stops, arrival boards and routes as if they came from a live
//! feed. Useful for tests and offline replays of captured data.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{RouteId, RouteStation, Stop, StopId, VehicleArrival};

use super::{ProviderError, TransitProvider};

/// Provider backed by in-memory tables.
#[derive(Debug, Default)]
pub struct StaticProvider {
    stops: HashMap<StopId, Stop>,
    arrivals: HashMap<StopId, Vec<VehicleArrival>>,
    routes: HashMap<RouteId, Arc<Vec<RouteStation>>>,
    /// Routes whose lookup fails as if the feed were down.
    failing_routes: HashSet<RouteId>,
    route_calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stop(mut self, stop: Stop) -> Self {
        self.stops.insert(stop.id.clone(), stop);
        self
    }

    /// Set the arrival board of `stop`.
    pub fn with_arrivals(mut self, stop: impl Into<StopId>, arrivals: Vec<VehicleArrival>) -> Self {
        self.arrivals.insert(stop.into(), arrivals);
        self
    }

    pub fn with_route(mut self, route: impl Into<RouteId>, stations: Vec<RouteStation>) -> Self {
        self.routes.insert(route.into(), Arc::new(stations));
        self
    }

    /// Make lookups of `route` fail with [`ProviderError::Unavailable`].
    pub fn with_failing_route(mut self, route: impl Into<RouteId>) -> Self {
        self.failing_routes.insert(route.into());
        self
    }

    /// Number of `route_stations` calls served so far.
    pub fn route_calls(&self) -> usize {
        self.route_calls.load(Ordering::Relaxed)
    }
}

impl TransitProvider for StaticProvider {
    async fn stop(&self, id: &StopId) -> Result<Stop, ProviderError> {
        self.stops
            .get(id)
            .cloned()
            .ok_or_else(|| ProviderError::StopNotFound(id.clone()))
    }

    async fn arrivals(&self, stop: &StopId) -> Result<Vec<VehicleArrival>, ProviderError> {
        Ok(self.arrivals.get(stop).cloned().unwrap_or_default())
    }

    async fn route_stations(
        &self,
        route: &RouteId,
    ) -> Result<Arc<Vec<RouteStation>>, ProviderError> {
        self.route_calls.fetch_add(1, Ordering::Relaxed);
        if self.failing_routes.contains(route) {
            return Err(ProviderError::Unavailable(format!("route feed down for {route}")));
        }
        self.routes
            .get(route)
            .cloned()
            .ok_or_else(|| ProviderError::RouteNotFound(route.clone()))
    }
}
