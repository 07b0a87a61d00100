//! Caching layer for provider responses.
//!
//! Stops and route sequences change rarely (timetable revisions), so they are
//! cached. Arrival boards are live data and always go to the inner provider.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{RouteId, RouteStation, Stop, StopId, VehicleArrival};

use super::{ProviderError, TransitProvider};

/// Cached route entry.
type RouteEntry = Arc<Vec<RouteStation>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per table.
    pub max_capacity: u64,
}

impl CacheConfig {
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        Self { ttl, max_capacity }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            max_capacity: 1000,
        }
    }
}

/// Provider wrapper that caches stop and route lookups.
///
/// Failed lookups are not cached.
pub struct CachedProvider<P> {
    inner: P,
    stops: MokaCache<StopId, Stop>,
    routes: MokaCache<RouteId, RouteEntry>,
}

impl<P: TransitProvider> CachedProvider<P> {
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        Self {
            inner,
            stops: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
            routes: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
        }
    }

    /// Access the underlying provider for operations that bypass the cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.stops.invalidate_all();
        self.routes.invalidate_all();
    }
}

impl<P: TransitProvider> TransitProvider for CachedProvider<P> {
    async fn stop(&self, id: &StopId) -> Result<Stop, ProviderError> {
        if let Some(cached) = self.stops.get(id).await {
            return Ok(cached);
        }

        let stop = self.inner.stop(id).await?;
        self.stops.insert(id.clone(), stop.clone()).await;
        Ok(stop)
    }

    async fn arrivals(&self, stop: &StopId) -> Result<Vec<VehicleArrival>, ProviderError> {
        self.inner.arrivals(stop).await
    }

    async fn route_stations(&self, route: &RouteId) -> Result<RouteEntry, ProviderError> {
        if let Some(cached) = self.routes.get(route).await {
            trace!(route = %route, "route cache hit");
            return Ok(cached);
        }

        let stations = self.inner.route_stations(route).await?;
        self.routes.insert(route.clone(), stations.clone()).await;
        Ok(stations)
    }
}
