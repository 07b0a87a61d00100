//! Segment classification.
//!
//! Splits the route at its first interior turnback point (or, lacking one, at
//! the midpoint) and decides which side of the split the requested ride lies
//! on. A ride that starts after the split is running back toward the start
//! terminal, which means the approaching vehicle must turn back before it can
//! serve the ride.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::RouteStation;
use crate::topology::{TerminalDetector, TopologyInfo};

/// Coarse position of a ride within the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Both stops before (or at) the split.
    FirstHalf,
    /// Both stops after the midpoint split, travelling forward.
    SecondHalf,
    /// Boarding before the split, alighting after it.
    FullRoute,
    /// Both stops after a turnback point: only reachable once the vehicle
    /// has reversed.
    Turnback,
    /// Boarding after the split, alighting before it.
    Reverse,
    /// One of the stops is not on the route.
    Unknown,
}

impl SegmentKind {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SegmentKind::FirstHalf => "first half",
            SegmentKind::SecondHalf => "second half",
            SegmentKind::FullRoute => "full route",
            SegmentKind::Turnback => "turnback segment",
            SegmentKind::Reverse => "reverse segment",
            SegmentKind::Unknown => "unknown",
        }
    }

    /// Whether the vehicle must reverse before it can serve the ride.
    pub fn is_reverse(&self) -> bool {
        matches!(self, SegmentKind::Turnback | SegmentKind::Reverse)
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the route was split for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitPoint {
    /// The first interior turnback point.
    Turnback(usize),
    /// Half the route length, used when no turnback point is known.
    Midpoint(usize),
}

impl SplitPoint {
    pub fn index(&self) -> usize {
        match self {
            SplitPoint::Turnback(i) | SplitPoint::Midpoint(i) => *i,
        }
    }
}

/// Classification of one ride.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentVerdict {
    pub kind: SegmentKind,
    /// Travel in increasing sequence order.
    pub forward: bool,
    /// Which end of the route the vehicle is heading toward.
    pub destination: String,
    /// Destination plus travel sense, e.g. "시청 (forward)".
    pub description: String,
    /// `None` when the ride could not be placed on the route.
    pub split: Option<SplitPoint>,
}

impl SegmentVerdict {
    fn new(
        kind: SegmentKind,
        forward: bool,
        destination: String,
        split: Option<SplitPoint>,
    ) -> Self {
        let sense = if forward { "forward" } else { "reverse" };
        Self {
            description: format!("{destination} ({sense})"),
            kind,
            forward,
            destination,
            split,
        }
    }

    /// Whether the ride can only be served after the vehicle turns back.
    pub fn is_reverse(&self) -> bool {
        self.kind.is_reverse()
    }
}

/// Classify a ride between two route positions.
///
/// Never fails. An unlocated stop yields a forward-biased
/// [`SegmentKind::Unknown`] verdict; the signal confidences carry the
/// uncertainty from there.
///
/// Indices equal to the split point count as being before it, so a rider
/// boarding or alighting at the turnback stop itself is not pushed into the
/// turnback segment.
pub fn classify_segment<D: TerminalDetector + ?Sized>(
    boarding: Option<usize>,
    alighting: Option<usize>,
    topology: &TopologyInfo,
    stations: &[RouteStation],
    detector: &D,
) -> SegmentVerdict {
    let destination_at = |index: usize| -> String {
        stations
            .get(index)
            .map(|s| detector.destination_name(&s.name))
            .unwrap_or_default()
    };
    let first = topology.start.index;
    let last = topology.end.index;

    let (Some(b), Some(a)) = (boarding, alighting) else {
        return SegmentVerdict::new(SegmentKind::Unknown, true, destination_at(last), None);
    };

    match topology.first_turnback() {
        Some(turnback) => {
            let t = turnback.index;
            let split = Some(SplitPoint::Turnback(t));
            match (b <= t, a <= t) {
                (true, true) => {
                    SegmentVerdict::new(SegmentKind::FirstHalf, true, destination_at(t), split)
                }
                (false, false) => {
                    SegmentVerdict::new(SegmentKind::Turnback, false, destination_at(first), split)
                }
                (true, false) => {
                    SegmentVerdict::new(SegmentKind::FullRoute, true, destination_at(last), split)
                }
                (false, true) => {
                    SegmentVerdict::new(SegmentKind::Reverse, false, destination_at(first), split)
                }
            }
        }
        None => {
            // The midpoint is only a guess at where the route reverses, so a
            // ride that keeps moving forward past it stays forward.
            let m = topology.len() / 2;
            let split = Some(SplitPoint::Midpoint(m));
            match (b <= m, a <= m) {
                (true, true) => {
                    SegmentVerdict::new(SegmentKind::FirstHalf, true, destination_at(last), split)
                }
                (false, false) if b <= a => {
                    SegmentVerdict::new(SegmentKind::SecondHalf, true, destination_at(last), split)
                }
                (false, false) => {
                    SegmentVerdict::new(SegmentKind::Turnback, false, destination_at(first), split)
                }
                (true, false) => {
                    SegmentVerdict::new(SegmentKind::FullRoute, true, destination_at(last), split)
                }
                (false, true) => {
                    SegmentVerdict::new(SegmentKind::Reverse, false, destination_at(first), split)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{TerminalKeywords, analyze_topology};

    fn route(names: &[&str]) -> Vec<RouteStation> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| RouteStation::new(format!("S{i}"), *name))
            .collect()
    }

    fn classify(names: &[&str], b: Option<usize>, a: Option<usize>) -> SegmentVerdict {
        let stations = route(names);
        let detector = TerminalKeywords::korean();
        let topology = analyze_topology(&stations, &detector, false).unwrap();
        classify_segment(b, a, &topology, &stations, &detector)
    }

    const WITH_TERMINAL: [&str; 7] = ["가경", "나", "다", "시청종점", "라", "마", "바"];
    const PLAIN: [&str; 6] = ["가경", "나", "다", "라", "마", "바"];

    #[test]
    fn before_turnback_is_first_half() {
        let v = classify(&WITH_TERMINAL, Some(0), Some(2));
        assert_eq!(v.kind, SegmentKind::FirstHalf);
        assert!(v.forward);
        assert_eq!(v.destination, "시청");
        assert_eq!(v.description, "시청 (forward)");
        assert_eq!(v.split, Some(SplitPoint::Turnback(3)));
    }

    #[test]
    fn after_turnback_is_turnback_segment() {
        let v = classify(&WITH_TERMINAL, Some(4), Some(6));
        assert_eq!(v.kind, SegmentKind::Turnback);
        assert!(!v.forward);
        assert!(v.is_reverse());
        assert_eq!(v.destination, "가경");
        assert_eq!(v.description, "가경 (reverse)");
    }

    #[test]
    fn crossing_turnback_is_full_route() {
        let v = classify(&WITH_TERMINAL, Some(1), Some(5));
        assert_eq!(v.kind, SegmentKind::FullRoute);
        assert!(v.forward);
        assert_eq!(v.destination, "바");
    }

    #[test]
    fn backwards_across_turnback_is_reverse() {
        let v = classify(&WITH_TERMINAL, Some(5), Some(1));
        assert_eq!(v.kind, SegmentKind::Reverse);
        assert!(!v.forward);
        assert_eq!(v.destination, "가경");
    }

    #[test]
    fn turnback_stop_itself_counts_as_before() {
        let board_at_split = classify(&WITH_TERMINAL, Some(3), Some(5));
        assert_eq!(board_at_split.kind, SegmentKind::FullRoute);

        let alight_at_split = classify(&WITH_TERMINAL, Some(1), Some(3));
        assert_eq!(alight_at_split.kind, SegmentKind::FirstHalf);
    }

    #[test]
    fn same_stop_before_split_is_forward() {
        let v = classify(&WITH_TERMINAL, Some(2), Some(2));
        assert_eq!(v.kind, SegmentKind::FirstHalf);
        assert!(v.forward);
    }

    #[test]
    fn first_of_several_turnbacks_is_used() {
        let names = ["가", "터미널", "다", "차고지", "마"];
        let v = classify(&names, Some(2), Some(4));
        assert_eq!(v.split, Some(SplitPoint::Turnback(1)));
        assert_eq!(v.kind, SegmentKind::Turnback);
    }

    #[test]
    fn midpoint_first_half() {
        // len 6, midpoint 3
        let v = classify(&PLAIN, Some(0), Some(2));
        assert_eq!(v.kind, SegmentKind::FirstHalf);
        assert_eq!(v.split, Some(SplitPoint::Midpoint(3)));
        assert_eq!(v.destination, "바");
    }

    #[test]
    fn midpoint_forward_in_second_half_stays_forward() {
        let v = classify(&PLAIN, Some(4), Some(5));
        assert_eq!(v.kind, SegmentKind::SecondHalf);
        assert!(v.forward);
        assert_eq!(v.destination, "바");
    }

    #[test]
    fn midpoint_backward_in_second_half_is_turnback() {
        let v = classify(&PLAIN, Some(5), Some(4));
        assert_eq!(v.kind, SegmentKind::Turnback);
        assert!(!v.forward);
        assert_eq!(v.destination, "가경");
    }

    #[test]
    fn midpoint_crossing() {
        assert_eq!(classify(&PLAIN, Some(1), Some(5)).kind, SegmentKind::FullRoute);
        assert_eq!(classify(&PLAIN, Some(5), Some(1)).kind, SegmentKind::Reverse);
    }

    #[test]
    fn unknown_stop_is_forward_biased() {
        let v = classify(&WITH_TERMINAL, None, Some(2));
        assert_eq!(v.kind, SegmentKind::Unknown);
        assert!(v.forward);
        assert!(!v.is_reverse());
        assert_eq!(v.split, None);
        assert_eq!(v.destination, "바");

        let v = classify(&WITH_TERMINAL, Some(2), None);
        assert_eq!(v.kind, SegmentKind::Unknown);
    }

    #[test]
    fn labels() {
        assert_eq!(SegmentKind::Turnback.to_string(), "turnback segment");
        assert_eq!(SegmentKind::FirstHalf.label(), "first half");
        assert!(SegmentKind::Reverse.is_reverse());
        assert!(!SegmentKind::SecondHalf.is_reverse());
        assert_eq!(SplitPoint::Midpoint(4).index(), 4);
    }
}
