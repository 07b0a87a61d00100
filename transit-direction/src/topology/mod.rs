//! Route topology analysis.
//!
//! Finds where a route starts, ends and turns back. Turnback detection is a
//! pluggable [`TerminalDetector`] because providers differ in what they
//! publish: most only give station names, a few give direction codes.

mod analyzer;
mod detector;

pub use analyzer::{TerminalPoint, TopologyInfo, analyze_topology};
pub use detector::{AnyOf, DirectionCodeDetector, TerminalDetector, TerminalKeywords};
