//! Direction resolution entry point.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{DirectionError, RouteStation, Stop, VehicleArrival};
use crate::locate::locate_station_with;
use crate::topology::{TerminalDetector, TerminalKeywords, TopologyInfo, analyze_topology};

use super::config::AnalyzerConfig;
use super::segment::{SegmentVerdict, classify_segment};
use super::signals::{SignalContext, SignalMethod, SignalResult, run_panel};
use super::verdict::{DirectionVerdict, synthesize};

/// Every intermediate result of one analysis, for callers that need more than
/// the verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub topology: TopologyInfo,
    pub boarding_index: Option<usize>,
    pub alighting_index: Option<usize>,
    pub segment: SegmentVerdict,
    pub signals: [SignalResult; 4],
    pub verdict: DirectionVerdict,
}

impl Analysis {
    /// The signal produced by `method`.
    pub fn signal(&self, method: SignalMethod) -> &SignalResult {
        // The panel always holds one signal per method, in declaration order
        &self.signals[method as usize]
    }
}

/// Resolves whether a ride can be served by an approaching vehicle.
///
/// Holds only immutable configuration, so one resolver can be shared across
/// threads and used for any number of concurrent analyses.
#[derive(Debug, Clone, Default)]
pub struct DirectionResolver<D = TerminalKeywords> {
    detector: D,
    config: AnalyzerConfig,
}

impl DirectionResolver {
    /// Resolver with the Korean keyword detector and default configuration.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: TerminalDetector> DirectionResolver<D> {
    /// Resolver with a custom turnback detector.
    pub fn with_detector(detector: D, config: AnalyzerConfig) -> Self {
        Self { detector, config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Run the full analysis and keep every intermediate result.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::EmptyTopology`] when `stations` is empty;
    /// nothing else is analysed in that case.
    pub fn analyze(
        &self,
        boarding: &Stop,
        alighting: &Stop,
        vehicle: &VehicleArrival,
        stations: &[RouteStation],
    ) -> Result<Analysis, DirectionError> {
        let topology =
            analyze_topology(stations, &self.detector, self.config.dedupe_terminal_names)?;

        let boarding_index = locate_station_with(stations, boarding, self.config.locate);
        let alighting_index = locate_station_with(stations, alighting, self.config.locate);
        if boarding_index.is_none() || alighting_index.is_none() {
            warn!(
                route = %vehicle.route_no,
                boarding = %boarding.id,
                alighting = %alighting.id,
                boarding_found = boarding_index.is_some(),
                alighting_found = alighting_index.is_some(),
                "stop not on route, direction is a guess"
            );
        }

        let segment = classify_segment(
            boarding_index,
            alighting_index,
            &topology,
            stations,
            &self.detector,
        );

        let signals = run_panel(&SignalContext {
            boarding: boarding_index,
            alighting: alighting_index,
            segment: &segment,
            stations,
            boarding_stop: boarding,
            alighting_stop: alighting,
            config: &self.config,
        });

        let verdict = synthesize(&signals, &segment, self.config.turnback_confidence_floor);

        debug!(
            route = %vehicle.route_no,
            topology = %topology,
            boarding_index,
            alighting_index,
            segment = %segment.kind,
            boardable = verdict.boardable,
            confidence = verdict.confidence,
            description = %verdict.description,
            "direction resolved"
        );

        Ok(Analysis {
            topology,
            boarding_index,
            alighting_index,
            segment,
            signals,
            verdict,
        })
    }

    /// Resolve the verdict for one vehicle and ride.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::EmptyTopology`] when `stations` is empty.
    pub fn resolve(
        &self,
        boarding: &Stop,
        alighting: &Stop,
        vehicle: &VehicleArrival,
        stations: &[RouteStation],
    ) -> Result<DirectionVerdict, DirectionError> {
        self.analyze(boarding, alighting, vehicle, stations)
            .map(|analysis| analysis.verdict)
    }
}

/// Resolve with the default detector and configuration.
///
/// # Examples
///
/// ```
/// use transit_direction::domain::{RouteStation, Stop, VehicleArrival};
/// use transit_direction::resolve_direction;
///
/// let route = vec![
///     RouteStation::new("A", "가경"),
///     RouteStation::new("B", "시청"),
///     RouteStation::new("C", "고속버스터미널"),
///     RouteStation::new("D", "시청"),
///     RouteStation::new("E", "가경"),
/// ];
/// let bus = VehicleArrival::new("R1", "502");
///
/// // Both stops lie after the terminal: the bus must turn back first.
/// let verdict = resolve_direction(
///     &Stop::new("D", "시청"),
///     &Stop::new("E", "가경"),
///     &bus,
///     &route,
/// )
/// .unwrap();
/// assert!(!verdict.boardable);
/// assert!(verdict.confidence >= 75);
/// ```
pub fn resolve_direction(
    boarding: &Stop,
    alighting: &Stop,
    vehicle: &VehicleArrival,
    stations: &[RouteStation],
) -> Result<DirectionVerdict, DirectionError> {
    DirectionResolver::new().resolve(boarding, alighting, vehicle, stations)
}
