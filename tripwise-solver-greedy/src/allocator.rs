//! Greedy admission of scored candidates under a time budget.
//!
//! Candidates are visited in descending score order. Each is admitted when
//! the minutes already committed, plus its own visit and inbound travel, plus
//! the estimated way home from it, fit the budget. Admission is inclusive, so
//! a candidate that uses the budget exactly is kept.
//!
//! The return leg checked at admission and the one reported afterwards use
//! different fallbacks when a candidate has no return distance. Admission
//! uses the inbound travel time ([`return_leg_minutes`]). The report uses the
//! outbound distance at [`AVERAGE_SPEED_KMH`] ([`reported_return_minutes`]).
//! When the reported leg no longer fits, remaining time is clamped at zero
//! and the shortfall is kept in [`Allocation::return_overrun_minutes`].

use std::cmp::Ordering;

use log::{debug, warn};
use tripwise_core::time_format::MINUTES_PER_HOUR;
use tripwise_core::{Destination, ScoredDestination};

/// Average travel speed used to turn a return distance into minutes.
pub const AVERAGE_SPEED_KMH: f64 = 40.0;

// Shortfalls below this are summation-order drift, not an overrun.
const DRIFT_TOLERANCE_MINUTES: f64 = 1e-9;

/// Minutes from `destination` back to the home address, as checked at admission.
///
/// Uses the return distance at [`AVERAGE_SPEED_KMH`] when it is known and
/// falls back to the inbound travel time otherwise.
///
/// # Examples
/// ```
/// use tripwise_core::Destination;
/// use tripwise_solver_greedy::return_leg_minutes;
///
/// let known = Destination::new("A", 60.0, 15.0, 2.0, 4.5).with_distance_to_source(2.0);
/// assert_eq!(return_leg_minutes(&known), 3.0);
///
/// let unknown = Destination::new("B", 60.0, 15.0, 2.0, 4.5);
/// assert_eq!(return_leg_minutes(&unknown), 15.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "converting kilometres to minutes at a fixed speed"
)]
#[must_use]
pub fn return_leg_minutes(destination: &Destination) -> f64 {
    destination.distance_to_source.map_or(
        destination.travel_time_from_source,
        |km| km * MINUTES_PER_HOUR / AVERAGE_SPEED_KMH,
    )
}

/// Reported minutes from the last stop of a route back to the home address.
///
/// Uses the return distance when it is known and the distance from the start
/// otherwise, both at [`AVERAGE_SPEED_KMH`].
///
/// # Examples
/// ```
/// use tripwise_core::Destination;
/// use tripwise_solver_greedy::reported_return_minutes;
///
/// let unknown = Destination::new("B", 60.0, 25.0, 10.0, 4.5);
/// assert_eq!(reported_return_minutes(&unknown), 15.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "converting kilometres to minutes at a fixed speed"
)]
#[must_use]
pub fn reported_return_minutes(destination: &Destination) -> f64 {
    destination
        .distance_to_source
        .unwrap_or(destination.distance_from_source)
        * MINUTES_PER_HOUR
        / AVERAGE_SPEED_KMH
}

/// The outcome of [`allocate`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Allocation {
    /// Admitted candidates in admission order.
    pub accepted: Vec<ScoredDestination>,
    /// Candidates that did not fit, in the order they were considered.
    pub skipped: Vec<ScoredDestination>,
    /// Visit and inbound travel minutes of the admitted candidates.
    pub committed_minutes: f64,
    /// Reported return leg of the last admitted candidate, or zero.
    pub estimated_return_minutes: f64,
    /// Budget left after the return leg, never negative.
    pub remaining_minutes: f64,
    /// Minutes by which the reported return leg overshoots the budget.
    ///
    /// Non-zero only when the last stop has no return distance and its
    /// outbound distance takes longer to drive than its inbound travel time.
    pub return_overrun_minutes: f64,
}

/// Admit candidates greedily by score within `available_minutes`.
///
/// Sorting is stable, so equal scores keep their input order. `NaN` scores
/// rank below every number.
///
/// # Examples
/// ```
/// use tripwise_core::{Destination, ScoredDestination};
/// use tripwise_solver_greedy::allocate;
///
/// let near = Destination::new("near", 30.0, 10.0, 1.0, 4.0).with_distance_to_source(1.0);
/// let far = Destination::new("far", 200.0, 60.0, 40.0, 5.0).with_distance_to_source(40.0);
/// let allocation = allocate(
///     vec![ScoredDestination::new(far, 0.9), ScoredDestination::new(near, 0.5)],
///     120.0,
/// );
/// assert_eq!(allocation.accepted.len(), 1);
/// assert_eq!(allocation.skipped.len(), 1);
/// assert_eq!(allocation.remaining_minutes, 78.5);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "budget accounting sums minute values"
)]
#[must_use]
pub fn allocate(mut scored: Vec<ScoredDestination>, available_minutes: f64) -> Allocation {
    scored.sort_by(|a, b| descending_score(a.score, b.score));

    let mut allocation = Allocation::default();
    for candidate in scored {
        let tentative = allocation.committed_minutes + candidate.destination.combined_minutes();
        let return_leg = return_leg_minutes(&candidate.destination);
        if tentative + return_leg <= available_minutes {
            debug!(
                "admitted '{}' (score {:.4}): {tentative:.1} min committed, {return_leg:.1} min home",
                candidate.destination.name, candidate.score
            );
            allocation.committed_minutes = tentative;
            allocation.accepted.push(candidate);
        } else {
            debug!(
                "skipped '{}' (score {:.4}): needs {:.1} of {available_minutes:.1} min",
                candidate.destination.name,
                candidate.score,
                tentative + return_leg
            );
            allocation.skipped.push(candidate);
        }
    }

    let visit: f64 = allocation
        .accepted
        .iter()
        .map(|s| s.destination.visit_time)
        .sum();
    let travel: f64 = allocation
        .accepted
        .iter()
        .map(|s| s.destination.travel_time_from_source)
        .sum();
    allocation.estimated_return_minutes = allocation
        .accepted
        .last()
        .map_or(0.0, |last| reported_return_minutes(&last.destination));

    let remaining = available_minutes - (visit + travel + allocation.estimated_return_minutes);
    if remaining < -DRIFT_TOLERANCE_MINUTES {
        warn!(
            "reported return leg of {:.1} min overshoots the {available_minutes:.1} min budget by {:.1} min",
            allocation.estimated_return_minutes, -remaining
        );
        allocation.return_overrun_minutes = -remaining;
    }
    allocation.remaining_minutes = remaining.max(0.0);
    allocation
}

fn descending_score(a: f64, b: f64) -> Ordering {
    rank_key(b).total_cmp(&rank_key(a))
}

#[expect(clippy::float_arithmetic, reason = "adding zero folds -0.0 into 0.0")]
fn rank_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score + 0.0
    }
}
