//! Transit direction resolver.
//!
//! Answers: "This bus is approaching my stop. Will it take me where I'm
//! going, or do I have to wait for it to reach its terminal and turn back?"
//!
//! Many urban routes are out-and-back: the vehicle runs from one terminal to
//! a turnaround point and returns along the same streets, serving the same
//! stops in both directions. Route feeds list the whole loop as one sequence,
//! so a stop appears on both legs. The [`analysis`] pipeline places both
//! stops on the sequence, works out which side of the turnaround the ride
//! lies on, cross-checks with independent heuristics and returns a
//! [`DirectionVerdict`](analysis::DirectionVerdict) with a confidence score.
//!
//! [`screen`] applies the same analysis to a whole arrival board fetched
//! through a [`TransitProvider`](provider::TransitProvider).

pub mod analysis;
pub mod domain;
pub mod geo;
pub mod locate;
pub mod provider;
pub mod screen;
pub mod topology;

pub use analysis::{DirectionResolver, DirectionVerdict, resolve_direction};
