//! Test-only doubles shared by unit, behaviour and property tests across the
//! workspace.

use std::collections::HashMap;

use crate::{
    Destination, Preferences, RecommendationBatch, Recommender, ScoredDestination, Scorer,
    TripQuery, UpstreamError,
};

/// Build a destination whose return leg equals its outbound distance.
///
/// The rating defaults to `4.0` and no category is set.
#[must_use]
pub fn round_trip_destination(name: &str, visit: f64, travel: f64, km: f64) -> Destination {
    Destination::new(name, visit, travel, km, 4.0).with_distance_to_source(km)
}

/// `Scorer` returning pre-assigned scores keyed by destination name.
///
/// Unknown names score `0.0`, which makes ordering depend purely on input
/// order for otherwise unscored candidates.
#[derive(Debug, Clone, Default)]
pub struct FixedScorer {
    scores: HashMap<String, f64>,
}

impl FixedScorer {
    /// Create a scorer from `(name, score)` pairs.
    #[must_use]
    pub fn new<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            scores: scores
                .into_iter()
                .map(|(name, score)| (name.into(), score))
                .collect(),
        }
    }
}

impl Scorer for FixedScorer {
    fn score_all(
        &self,
        candidates: &[Destination],
        _preferences: &Preferences,
    ) -> Vec<ScoredDestination> {
        candidates
            .iter()
            .cloned()
            .map(|d| {
                let score = self.scores.get(&d.name).copied().unwrap_or(0.0);
                ScoredDestination::new(d, score)
            })
            .collect()
    }
}

/// Stub `Recommender` returning a pre-configured batch or error.
#[derive(Debug, Clone)]
pub struct StubRecommender {
    response: Result<RecommendationBatch, UpstreamError>,
}

impl StubRecommender {
    /// Respond with `batch` to every query.
    #[must_use]
    pub const fn with_batch(batch: RecommendationBatch) -> Self {
        Self {
            response: Ok(batch),
        }
    }

    /// Fail every query with `error`.
    #[must_use]
    pub const fn with_error(error: UpstreamError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl Recommender for StubRecommender {
    fn recommend(&self, _query: &TripQuery) -> Result<RecommendationBatch, UpstreamError> {
        self.response.clone()
    }
}
