//! Verdict synthesis.
//!
//! Folds the signal panel into one decision. A reverse segment overrides the
//! vote: a vehicle heading away from the destination cannot be boarded no
//! matter how the individual heuristics read the stop order.

use serde::{Deserialize, Serialize};

use super::segment::SegmentVerdict;
use super::signals::SignalResult;

/// Segment label of a boardable verdict.
pub const BOARDABLE: &str = "boardable";

/// Segment label of a verdict that must wait for the vehicle to turn back.
pub const WAIT_FOR_TURNBACK: &str = "wait for turnback";

/// Prefix applied to the direction description when boarding now is not possible.
pub const AFTER_TURNBACK: &str = "after turnback, heading toward";

/// Final answer for one vehicle and ride.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionVerdict {
    /// The approaching vehicle can be boarded for this ride.
    pub boardable: bool,
    pub segment: String,
    pub description: String,
    /// Aggregate confidence in `0..=100`.
    pub confidence: u8,
    /// Which end of the route the vehicle is heading toward.
    pub destination: String,
    pub forward: bool,
}

/// Combine the signal panel with the segment classification.
///
/// `turnback_floor` is the minimum confidence of a reverse-segment verdict.
pub fn synthesize(
    signals: &[SignalResult],
    segment: &SegmentVerdict,
    turnback_floor: u8,
) -> DirectionVerdict {
    let mean = mean_confidence(signals);

    let (boardable, label, confidence) = if segment.is_reverse() {
        (false, WAIT_FOR_TURNBACK.to_string(), mean.max(turnback_floor))
    } else {
        let valid = signals.iter().filter(|s| s.valid).count();
        let invalid = signals.len() - valid;

        if valid > invalid {
            (true, BOARDABLE.to_string(), mean)
        } else if invalid > valid {
            (false, WAIT_FOR_TURNBACK.to_string(), mean)
        } else {
            match strongest(signals) {
                Some(top) => (top.valid, top.segment.clone(), mean),
                None => (true, BOARDABLE.to_string(), mean),
            }
        }
    };

    let description = if boardable {
        segment.description.clone()
    } else {
        format!("{AFTER_TURNBACK} {}", segment.description)
    };

    DirectionVerdict {
        boardable,
        segment: label,
        description,
        confidence,
        destination: segment.destination.clone(),
        forward: segment.forward,
    }
}

/// Floor of the mean confidence; 0 for an empty panel.
pub fn mean_confidence(signals: &[SignalResult]) -> u8 {
    if signals.is_empty() {
        return 0;
    }
    let total: u32 = signals.iter().map(|s| u32::from(s.confidence)).sum();
    // Each confidence is at most 255, so the mean fits
    (total / signals.len() as u32) as u8
}

/// Highest-confidence signal; the earliest wins on equal confidence.
fn strongest(signals: &[SignalResult]) -> Option<&SignalResult> {
    signals
        .iter()
        .reduce(|best, s| if s.confidence > best.confidence { s } else { best })
}
