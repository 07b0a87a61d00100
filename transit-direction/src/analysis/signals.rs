//! The signal panel: four independent direction heuristics.
//!
//! Each heuristic inspects the ride from a different angle and reports a
//! [`SignalResult`]. None of them can fail; bad or missing input shows up as
//! a lower confidence or a fail-open verdict.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::{RouteStation, Stop};
use crate::geo::haversine_distance;

use super::config::{AnalyzerConfig, RouteDistance};
use super::segment::SegmentVerdict;

/// Confidence reported by an ordinal heuristic that has no positions to compare.
const UNPLACED_CONFIDENCE: u8 = 0;

/// Which heuristic produced a signal. Declaration order is panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalMethod {
    BasicOrder,
    TerminalPosition,
    StationOrder,
    CoordinateRatio,
}

impl SignalMethod {
    pub fn tag(&self) -> &'static str {
        match self {
            SignalMethod::BasicOrder => "BASIC_ORDER",
            SignalMethod::TerminalPosition => "TERMINAL_POSITION",
            SignalMethod::StationOrder => "STATION_ORDER",
            SignalMethod::CoordinateRatio => "COORDINATE_RATIO",
        }
    }
}

impl fmt::Display for SignalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One heuristic's opinion about the ride.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalResult {
    pub method: SignalMethod,
    pub valid: bool,
    /// Heuristic weight in `0..=100`.
    pub confidence: u8,
    pub segment: String,
    pub rationale: String,
}

impl SignalResult {
    fn new(
        method: SignalMethod,
        valid: bool,
        confidence: u8,
        segment: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            method,
            valid,
            confidence,
            segment: segment.into(),
            rationale: rationale.into(),
        }
    }
}

impl fmt::Display for SignalResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}: {}, confidence {}%]",
            self.method, self.rationale, self.confidence
        )
    }
}

/// Everything a heuristic may look at.
#[derive(Debug, Clone, Copy)]
pub struct SignalContext<'a> {
    pub boarding: Option<usize>,
    pub alighting: Option<usize>,
    pub segment: &'a SegmentVerdict,
    pub stations: &'a [RouteStation],
    pub boarding_stop: &'a Stop,
    pub alighting_stop: &'a Stop,
    pub config: &'a AnalyzerConfig,
}

impl SignalContext<'_> {
    fn positions(&self) -> Option<(usize, usize)> {
        Some((self.boarding?, self.alighting?))
    }
}

/// Run all four heuristics in panel order.
pub fn run_panel(ctx: &SignalContext<'_>) -> [SignalResult; 4] {
    let signals = [
        basic_order(ctx),
        terminal_position(ctx),
        station_order(ctx),
        coordinate_ratio(ctx),
    ];
    for signal in &signals {
        trace!(
            method = %signal.method,
            valid = signal.valid,
            confidence = signal.confidence,
            rationale = %signal.rationale,
            "signal"
        );
    }
    signals
}

fn unplaced(method: SignalMethod) -> SignalResult {
    SignalResult::new(method, true, UNPLACED_CONFIDENCE, "unknown", "stop not on route")
}

/// Stop order alone, ignoring topology. Weakest signal.
pub fn basic_order(ctx: &SignalContext<'_>) -> SignalResult {
    let Some((b, a)) = ctx.positions() else {
        return unplaced(SignalMethod::BasicOrder);
    };

    let forward = b < a;
    SignalResult::new(
        SignalMethod::BasicOrder,
        forward,
        40,
        if forward { "forward (estimated)" } else { "reverse (estimated)" },
        "no direction data, estimated from stop order",
    )
}

/// Position relative to the route's turnback point.
///
/// A ride in a reverse segment is rejected outright with high confidence.
pub fn terminal_position(ctx: &SignalContext<'_>) -> SignalResult {
    if ctx.segment.is_reverse() {
        return SignalResult::new(
            SignalMethod::TerminalPosition,
            false,
            85,
            "wait for turnback",
            "turnback segment: boarding not possible until reversal",
        );
    }

    let Some((b, a)) = ctx.positions() else {
        return unplaced(SignalMethod::TerminalPosition);
    };

    let forward = b < a;
    SignalResult::new(
        SignalMethod::TerminalPosition,
        forward,
        80,
        ctx.segment.kind.label(),
        if forward {
            "forward travel confirmed by terminal position"
        } else {
            "alighting stop does not follow boarding stop"
        },
    )
}

/// Ordinal distance along the sequence.
pub fn station_order(ctx: &SignalContext<'_>) -> SignalResult {
    let Some((b, a)) = ctx.positions() else {
        return unplaced(SignalMethod::StationOrder);
    };

    let forward = b < a;
    SignalResult::new(
        SignalMethod::StationOrder,
        forward,
        60,
        if forward { "forward" } else { "reverse" },
        format!("stop order: {b} -> {a}"),
    )
}

/// Along-route distance compared with straight-line distance.
///
/// A ride whose route distance is many times the straight-line distance is
/// probably going the long way round, i.e. the wrong way. Missing geodata
/// fails open.
pub fn coordinate_ratio(ctx: &SignalContext<'_>) -> SignalResult {
    let insufficient = || {
        SignalResult::new(
            SignalMethod::CoordinateRatio,
            true,
            50,
            "no geodata",
            "insufficient coordinate data",
        )
    };

    let Some((b, a)) = ctx.positions() else {
        return insufficient();
    };
    let (Some(from), Some(to)) = (ctx.boarding_stop.location, ctx.alighting_stop.location) else {
        return insufficient();
    };

    let direct = haversine_distance(from, to);
    if direct.is_nan() || direct <= 0.0 {
        return insufficient();
    }

    let ratio = route_distance_estimate(ctx.stations, b, a, ctx.config) / direct;
    if ratio.is_nan() {
        return insufficient();
    }

    let (valid, confidence, note) = ratio_verdict(ratio);
    SignalResult::new(
        SignalMethod::CoordinateRatio,
        valid,
        confidence,
        "route distance",
        format!("route/direct distance ratio {ratio:.2} ({note})"),
    )
}

/// Map a route/direct distance ratio to (valid, confidence, note).
pub(crate) fn ratio_verdict(ratio: f64) -> (bool, u8, &'static str) {
    if ratio < 2.0 {
        (true, 60, "normal")
    } else if ratio < 5.0 {
        (true, 50, "indirect")
    } else if ratio < 10.0 {
        (true, 40, "detour suspected")
    } else {
        (false, 40, "excessive detour, likely wrong direction")
    }
}

/// Estimated along-route distance between two positions, in metres.
pub fn route_distance_estimate(
    stations: &[RouteStation],
    boarding: usize,
    alighting: usize,
    config: &AnalyzerConfig,
) -> f64 {
    let spacing = boarding.abs_diff(alighting) as f64 * config.stop_spacing_m;

    match config.route_distance {
        RouteDistance::StopSpacing => spacing,
        RouteDistance::StationCoordinates => {
            let lo = boarding.min(alighting);
            let hi = boarding.max(alighting);
            let Some(span) = stations.get(lo..=hi) else {
                return spacing;
            };
            let legs: Option<f64> = span
                .windows(2)
                .map(|pair| Some(haversine_distance(pair[0].location?, pair[1].location?)))
                .sum();
            legs.unwrap_or(spacing)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::analysis::segment::{SegmentKind, SplitPoint};
    use proptest::prelude::*;

    fn confidence_at(span: usize, lat_offset: f64) -> u8 {
        let stations: Vec<RouteStation> = (0..=span)
            .map(|i| RouteStation::new(format!("S{i}"), format!("정류장{i}")))
            .collect();
        let segment = SegmentVerdict {
            kind: SegmentKind::FirstHalf,
            forward: true,
            destination: "끝".into(),
            description: "끝 (forward)".into(),
            split: Some(SplitPoint::Midpoint(span / 2)),
        };
        let from = Stop::new("S0", "정류장0").at(36.6, 127.4);
        let to = Stop::new("SX", "elsewhere").at(36.6 + lat_offset, 127.4);
        let config = AnalyzerConfig::default();
        let ctx = SignalContext {
            boarding: Some(0),
            alighting: Some(span),
            segment: &segment,
            stations: &stations,
            boarding_stop: &from,
            alighting_stop: &to,
            config: &config,
        };
        coordinate_ratio(&ctx).confidence
    }

    proptest! {
        /// A longer straight-line distance never makes the detour look worse.
        #[test]
        fn confidence_monotone_in_direct_distance(
            span in 1usize..40,
            near in 0.0001f64..0.2,
            extra in 0.0f64..0.2,
        ) {
            let closer = confidence_at(span, near);
            let farther = confidence_at(span, near + extra);
            prop_assert!(closer <= farther);
        }

        /// More stops between the same two points never raises confidence.
        #[test]
        fn confidence_antitone_in_route_span(
            span in 1usize..40,
            more in 0usize..40,
            offset in 0.0001f64..0.2,
        ) {
            prop_assert!(confidence_at(span + more, offset) <= confidence_at(span, offset));
        }

        /// Confidence is always one of the documented bands.
        #[test]
        fn confidence_in_band(span in 0usize..40, offset in -0.2f64..0.2) {
            let c = confidence_at(span, offset);
            prop_assert!(c == 40 || c == 50 || c == 60);
        }
    }
}
