//! Direction analysis.
//!
//! The pipeline for one vehicle and ride: analyse the route topology, place
//! both stops on the route, classify the ride's segment, run the signal panel
//! and synthesise a verdict. Every step is a pure function of its inputs.

mod config;
mod resolver;
mod segment;
mod signals;
mod verdict;

pub use config::{AnalyzerConfig, RouteDistance};
pub use resolver::{Analysis, DirectionResolver, resolve_direction};
pub use segment::{SegmentKind, SegmentVerdict, SplitPoint, classify_segment};
pub use signals::{
    SignalContext, SignalMethod, SignalResult, basic_order, coordinate_ratio,
    route_distance_estimate, run_panel, station_order, terminal_position,
};
pub use verdict::{
    AFTER_TURNBACK, BOARDABLE, DirectionVerdict, WAIT_FOR_TURNBACK, mean_confidence, synthesize,
};
