//! Screening of approaching vehicles.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::{DirectionResolver, DirectionVerdict};
use crate::domain::{RouteId, RouteStation, StopId, VehicleArrival};
use crate::provider::{ProviderError, TransitProvider};
use crate::topology::TerminalDetector;

use super::config::ScreenConfig;

/// What a rider should do about one approaching vehicle.
///
/// Ordered best-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    /// Board the vehicle.
    Board,
    /// Direction could not be established with enough confidence.
    Uncertain,
    /// The vehicle serves the ride only after turning back.
    WaitForTurnback,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Board => "board",
            Recommendation::Uncertain => "uncertain",
            Recommendation::WaitForTurnback => "wait for turnback",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One screened vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateAssessment {
    pub vehicle: VehicleArrival,
    pub verdict: DirectionVerdict,
    pub recommendation: Recommendation,
}

impl CandidateAssessment {
    /// Predicted time until the vehicle reaches the boarding stop.
    pub fn eta(&self) -> chrono::Duration {
        self.vehicle.eta()
    }
}

/// Error from candidate screening.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScreenError {
    /// Boarding or alighting stop lookup failed.
    #[error("failed to look up stop {stop}: {source}")]
    Stop { stop: StopId, source: ProviderError },

    /// The arrival board for the boarding stop could not be fetched.
    #[error("failed to fetch arrivals at {stop}: {source}")]
    Arrivals { stop: StopId, source: ProviderError },
}

/// Map a verdict onto a recommendation tier.
///
/// `ordered` is whether the boarding stop precedes the alighting stop on the
/// vehicle's route; it corroborates medium-confidence verdicts.
pub fn recommend(
    verdict: &DirectionVerdict,
    ordered: bool,
    config: &ScreenConfig,
) -> Recommendation {
    if !verdict.boardable {
        Recommendation::WaitForTurnback
    } else if verdict.confidence >= config.high_confidence {
        Recommendation::Board
    } else if verdict.confidence >= config.medium_confidence && ordered {
        Recommendation::Board
    } else {
        Recommendation::Uncertain
    }
}

/// Resolve the direction of every vehicle approaching `boarding` for a ride
/// to `alighting`.
///
/// Route sequences are fetched once per distinct route, `config.batch_size`
/// at a time. A vehicle whose route cannot be fetched, or whose route is
/// empty, is logged and left out. Results are sorted by recommendation, then
/// by predicted arrival.
///
/// # Errors
///
/// Fails only when a stop lookup or the arrival board itself fails.
pub async fn screen_candidates<P, D>(
    provider: &P,
    resolver: &DirectionResolver<D>,
    boarding: &StopId,
    alighting: &StopId,
    config: &ScreenConfig,
) -> Result<Vec<CandidateAssessment>, ScreenError>
where
    P: TransitProvider,
    D: TerminalDetector,
{
    let from = provider
        .stop(boarding)
        .await
        .map_err(|source| ScreenError::Stop {
            stop: boarding.clone(),
            source,
        })?;
    let to = provider
        .stop(alighting)
        .await
        .map_err(|source| ScreenError::Stop {
            stop: alighting.clone(),
            source,
        })?;
    let arrivals = provider
        .arrivals(boarding)
        .await
        .map_err(|source| ScreenError::Arrivals {
            stop: boarding.clone(),
            source,
        })?;

    let distinct: Vec<RouteId> = {
        let mut seen = HashSet::new();
        arrivals
            .iter()
            .filter(|v| seen.insert(&v.route_id))
            .map(|v| v.route_id.clone())
            .collect()
    };
    let routes = batch_fetch_routes(provider, &distinct, config.batch_size).await;

    let vehicles = arrivals.len();
    let mut candidates = Vec::with_capacity(vehicles);

    for vehicle in arrivals {
        let Some(stations) = routes.get(&vehicle.route_id) else {
            continue;
        };

        let analysis = match resolver.analyze(&from, &to, &vehicle, stations.as_slice()) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(
                    route = %vehicle.route_id,
                    route_no = %vehicle.route_no,
                    error = %e,
                    "cannot analyse vehicle, skipping"
                );
                continue;
            }
        };

        let ordered = matches!(
            (analysis.boarding_index, analysis.alighting_index),
            (Some(b), Some(a)) if b < a
        );
        let recommendation = recommend(&analysis.verdict, ordered, config);

        candidates.push(CandidateAssessment {
            vehicle,
            verdict: analysis.verdict,
            recommendation,
        });
    }

    candidates.sort_by_key(|c| (c.recommendation, c.eta()));

    debug!(
        boarding = %boarding,
        alighting = %alighting,
        vehicles,
        routes = distinct.len(),
        candidates = candidates.len(),
        "screening complete"
    );

    Ok(candidates)
}

/// Fetch route sequences in parallel batches.
///
/// Failed lookups are logged and omitted from the result.
async fn batch_fetch_routes<P: TransitProvider>(
    provider: &P,
    routes: &[RouteId],
    batch_size: usize,
) -> HashMap<RouteId, Arc<Vec<RouteStation>>> {
    let mut fetched = HashMap::with_capacity(routes.len());

    for batch in routes.chunks(batch_size.max(1)) {
        let futures: Vec<_> = batch
            .iter()
            .map(|route| async move {
                let result = provider.route_stations(route).await;
                (route, result)
            })
            .collect();

        for (route, result) in join_all(futures).await {
            match result {
                Ok(stations) => {
                    fetched.insert(route.clone(), stations);
                }
                Err(e) => {
                    warn!(
                        route = %route,
                        error = %e,
                        "failed to fetch route, skipping its vehicles"
                    );
                }
            }
        }
    }

    fetched
}
