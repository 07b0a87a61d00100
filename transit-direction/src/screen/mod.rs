//! Candidate screening.
//!
//! Answers the rider's practical question for a whole arrival board: which of
//! the approaching vehicles should I board? Each vehicle's direction is
//! resolved against its own route and mapped onto a confidence tier.

mod candidates;
mod config;

pub use candidates::{
    CandidateAssessment, Recommendation, ScreenError, recommend, screen_candidates,
};
pub use config::ScreenConfig;
