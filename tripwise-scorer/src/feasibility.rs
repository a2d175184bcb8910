//! Weighted feasibility scoring over a candidate set.

use log::debug;
use tripwise_core::{Destination, Preferences, ScoredDestination, Scorer};

use crate::{PreferenceScores, ScoreWeights};

/// Denominator for [`Destination::rating`].
const RATING_SCALE: f64 = 5.0;
/// Denominator for [`Destination::popularity`].
const POPULARITY_SCALE: f64 = 10.0;

/// Score candidates by rating, proximity, time cost, preference match and
/// popularity.
///
/// Proximity and time cost are relative: the farthest candidate scores `0.0`
/// on distance and the most time-consuming scores `0.0` on time. When every
/// candidate shares a zero maximum the signal is treated as perfect.
///
/// # Examples
/// ```
/// use tripwise_core::{Category, Destination, Preferences, Scorer};
/// use tripwise_scorer::FeasibilityScorer;
///
/// let park = Destination::new("Parc Monceau", 45.0, 10.0, 1.0, 4.0)
///     .with_category(Category::Nature);
/// let scored = FeasibilityScorer::new().score_all(&[park], &Preferences::new(["nature"]));
/// let score = scored.first().map(|s| s.score).unwrap_or_default();
/// // rating 0.8, distance 0, time 0, preference 1, popularity 0.5
/// assert!((score - 0.44).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeasibilityScorer {
    weights: ScoreWeights,
    preference: PreferenceScores,
}

impl FeasibilityScorer {
    /// Build a scorer using the policy weights.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            weights: ScoreWeights::POLICY,
            preference: PreferenceScores::POLICY,
        }
    }

    /// The weights this scorer applies.
    #[must_use]
    pub const fn weights(&self) -> ScoreWeights {
        self.weights
    }

    fn preference_signal(&self, destination: &Destination, preferences: &Preferences) -> f64 {
        if preferences.is_empty() {
            return self.preference.neutral;
        }
        match destination.category {
            Some(category) if preferences.matches(category) => self.preference.matched,
            _ => self.preference.unmatched,
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "scoring is a weighted sum of normalised signals"
    )]
    fn score_one(
        &self,
        destination: &Destination,
        preferences: &Preferences,
        bounds: Bounds,
    ) -> f64 {
        let rating = destination.rating / RATING_SCALE;
        let distance = inverse_share(destination.distance_from_source, bounds.distance);
        let time = inverse_share(destination.combined_minutes(), bounds.minutes);
        let preference = self.preference_signal(destination, preferences);
        let popularity = destination.popularity_or_default() / POPULARITY_SCALE;
        let w = self.weights;
        w.rating * rating
            + w.distance * distance
            + w.time * time
            + w.preference * preference
            + w.popularity * popularity
    }
}

impl Default for FeasibilityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for FeasibilityScorer {
    fn score_all(
        &self,
        candidates: &[Destination],
        preferences: &Preferences,
    ) -> Vec<ScoredDestination> {
        let bounds = Bounds::of(candidates);
        candidates
            .iter()
            .map(|destination| {
                let score = Self::sanitise(self.score_one(destination, preferences, bounds));
                debug!(
                    "scored destination '{}' at {score:.4}",
                    destination.name
                );
                ScoredDestination::new(destination.clone(), score)
            })
            .collect()
    }
}

/// Largest distance and time cost in a candidate set.
#[derive(Debug, Clone, Copy, Default)]
struct Bounds {
    distance: f64,
    minutes: f64,
}

impl Bounds {
    fn of(candidates: &[Destination]) -> Self {
        candidates.iter().fold(Self::default(), |acc, d| Self {
            distance: acc.distance.max(d.distance_from_source),
            minutes: acc.minutes.max(d.combined_minutes()),
        })
    }
}

/// `1 - value / max`, or `1.0` when `max` is zero.
#[expect(
    clippy::float_arithmetic,
    reason = "normalisation divides by the set maximum"
)]
fn inverse_share(value: f64, max: f64) -> f64 {
    if max > 0.0 { 1.0 - value / max } else { 1.0 }
}
