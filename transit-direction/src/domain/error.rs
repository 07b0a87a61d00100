//! Domain error types.
//!
//! The direction engine is a best-effort heuristic: stops missing from the
//! route, absent coordinates and NaN distances only lower confidence. The one
//! contract violation is handing it a route with no stations.

/// Errors from direction analysis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectionError {
    /// The route station sequence was empty
    #[error("route station sequence is empty")]
    EmptyTopology,
}
