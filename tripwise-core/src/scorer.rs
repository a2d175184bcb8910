//! Score candidate destinations for a planning run.
//!
//! The [`Scorer`] trait assigns every candidate a desirability score. Scores
//! may be normalised against the whole candidate set, so implementations see
//! all candidates at once rather than one at a time.

use crate::{Destination, Preferences, ScoredDestination};

/// Calculate desirability scores for a set of candidates.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so scorers can be
/// shared between concurrent planning requests. The method is infallible.
///
/// Implementations must:
/// - Return exactly one [`ScoredDestination`] per input, in input order.
/// - Preserve every destination field unchanged.
/// - Produce finite scores normalised to `0.0..=1.0`.
///
/// Use [`Scorer::sanitise`] to apply the range guard.
///
/// # Examples
///
/// ```rust
/// use tripwise_core::{Destination, Preferences, ScoredDestination, Scorer};
///
/// struct FlatScorer;
///
/// impl Scorer for FlatScorer {
///     fn score_all(
///         &self,
///         candidates: &[Destination],
///         _preferences: &Preferences,
///     ) -> Vec<ScoredDestination> {
///         candidates
///             .iter()
///             .cloned()
///             .map(|d| ScoredDestination::new(d, 1.0))
///             .collect()
///     }
/// }
///
/// let candidates = [Destination::new("Opera", 30.0, 10.0, 1.0, 4.0)];
/// let scored = FlatScorer.score_all(&candidates, &Preferences::default());
/// assert_eq!(scored.len(), 1);
/// ```
pub trait Scorer: Send + Sync {
    /// Score `candidates` according to `preferences`.
    fn score_all(
        &self,
        candidates: &[Destination],
        preferences: &Preferences,
    ) -> Vec<ScoredDestination>;

    /// Clamp and validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
    #[must_use]
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, 1.0)
    }
}
