//! Route shape analysis.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::{DirectionError, RouteStation};

use super::TerminalDetector;

/// A station index where the route starts, ends or turns back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalPoint {
    pub name: String,
    pub index: usize,
}

impl TerminalPoint {
    fn at(stations: &[RouteStation], index: usize) -> Self {
        Self {
            name: stations[index].name.clone(),
            index,
        }
    }
}

/// The analysed shape of one route.
///
/// Always has a start and end terminal (the same point for a one-station
/// route). Interior turnback points are sorted by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyInfo {
    pub start: TerminalPoint,
    pub end: TerminalPoint,
    pub turnbacks: Vec<TerminalPoint>,
}

impl TopologyInfo {
    /// The first interior turnback point, if any.
    pub fn first_turnback(&self) -> Option<&TerminalPoint> {
        self.turnbacks.first()
    }

    /// Number of stations on the route.
    pub fn len(&self) -> usize {
        self.end.index + 1
    }

    /// Always false; a topology is never built from an empty route.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for TopologyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "start {}({}), end {}({}), {} turnback(s)",
            self.start.name,
            self.start.index,
            self.end.name,
            self.end.index,
            self.turnbacks.len()
        )
    }
}

/// Analyse a route's terminals and interior turnback points.
///
/// The first and last stations are always the start and end terminals.
/// Interior stations flagged by `detector` become turnback points. With
/// `dedupe_names`, a turnback whose name was already recorded is skipped, so
/// a turnback stop listed twice in a row yields a single split candidate.
///
/// # Errors
///
/// Returns [`DirectionError::EmptyTopology`] when `stations` is empty.
pub fn analyze_topology<D: TerminalDetector + ?Sized>(
    stations: &[RouteStation],
    detector: &D,
    dedupe_names: bool,
) -> Result<TopologyInfo, DirectionError> {
    let last = stations.len().checked_sub(1).ok_or(DirectionError::EmptyTopology)?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut turnbacks = Vec::new();

    for index in 1..last {
        if !detector.is_turnback(stations, index) {
            continue;
        }
        let name = stations[index].name.as_str();
        if dedupe_names && !seen.insert(name) {
            continue;
        }
        trace!(index, station = name, "interior turnback found");
        turnbacks.push(TerminalPoint::at(stations, index));
    }

    Ok(TopologyInfo {
        start: TerminalPoint::at(stations, 0),
        end: TerminalPoint::at(stations, last),
        turnbacks,
    })
}
