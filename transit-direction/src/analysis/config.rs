//! Tuning parameters for direction analysis.

use crate::locate::LocateStrategy;

/// How the along-route distance between two stops is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteDistance {
    /// Stop count times the average stop spacing.
    #[default]
    StopSpacing,
    /// Sum of straight-line legs between consecutive route stations.
    ///
    /// Falls back to [`RouteDistance::StopSpacing`] when any station in the
    /// span lacks coordinates.
    StationCoordinates,
}

/// Configuration for [`DirectionResolver`](super::DirectionResolver).
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Assumed average distance between consecutive stops (metres).
    pub stop_spacing_m: f64,

    /// Strategy for the along-route distance estimate.
    pub route_distance: RouteDistance,

    /// Minimum confidence reported for a turnback verdict.
    pub turnback_confidence_floor: u8,

    /// Record each turnback station name only once.
    /// Guards against a turnback stop listed several times in a row.
    pub dedupe_terminal_names: bool,

    /// How boarding and alighting stops are placed on the route.
    pub locate: LocateStrategy,
}

impl AnalyzerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        stop_spacing_m: f64,
        route_distance: RouteDistance,
        turnback_confidence_floor: u8,
        dedupe_terminal_names: bool,
        locate: LocateStrategy,
    ) -> Self {
        Self {
            stop_spacing_m,
            route_distance,
            turnback_confidence_floor,
            dedupe_terminal_names,
            locate,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            stop_spacing_m: 500.0,
            route_distance: RouteDistance::StopSpacing,
            turnback_confidence_floor: 75,
            dedupe_terminal_names: false,
            locate: LocateStrategy::Exact,
        }
    }
}
