//! Real-time vehicle arrival records.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::RouteId;

/// A vehicle currently approaching a stop, as reported by the arrival board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleArrival {
    /// Route the vehicle is running on.
    pub route_id: RouteId,
    /// Route number shown to riders (e.g. "502").
    pub route_no: String,
    /// Stops the vehicle still has to pass before reaching this stop.
    pub stops_away: u32,
    /// Predicted seconds until arrival.
    pub arrival_secs: u32,
}

impl VehicleArrival {
    pub fn new(route_id: impl Into<RouteId>, route_no: impl Into<String>) -> Self {
        Self {
            route_id: route_id.into(),
            route_no: route_no.into(),
            stops_away: 0,
            arrival_secs: 0,
        }
    }

    /// Returns this arrival with the given prediction.
    pub fn arriving_in(mut self, arrival_secs: u32, stops_away: u32) -> Self {
        self.arrival_secs = arrival_secs;
        self.stops_away = stops_away;
        self
    }

    /// Predicted time until the vehicle reaches the stop.
    pub fn eta(&self) -> Duration {
        Duration::seconds(i64::from(self.arrival_secs))
    }
}
