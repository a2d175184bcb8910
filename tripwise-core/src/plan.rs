//! Trip plans: scored candidates, the admitted route and its summary.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Destination, ExcludedRecord};

/// A destination together with its desirability score for one planning run.
///
/// Scores are normalised against the run's own candidate set and are not
/// comparable across runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoredDestination {
    /// The scored candidate.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub destination: Destination,
    /// Score in `0.0..=1.0`.
    pub score: f64,
}

impl ScoredDestination {
    /// Attach a score to a destination.
    #[must_use]
    pub const fn new(destination: Destination, score: f64) -> Self {
        Self { destination, score }
    }
}

/// Aggregate figures over the admitted route.
///
/// All times are minutes and distances kilometres. Averages are zero for an
/// empty route.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TripSummary {
    /// Number of admitted stops.
    pub total_locations: usize,
    /// Sum of on-site minutes.
    pub total_visit_time: f64,
    /// Sum of inbound travel minutes.
    pub total_travel_time: f64,
    /// Sum of distances from the start.
    pub total_distance: f64,
    /// Mean rating of admitted stops.
    pub average_rating: f64,
    /// Mean score of admitted stops.
    pub average_score: f64,
    /// Visit, travel and return minutes combined.
    pub total_trip_time: f64,
}

impl TripSummary {
    /// Summarise an admitted route given the minutes needed to return home
    /// from its final stop.
    ///
    /// # Examples
    /// ```
    /// use tripwise_core::{Destination, ScoredDestination, TripSummary};
    ///
    /// let route = vec![
    ///     ScoredDestination::new(Destination::new("A", 60.0, 15.0, 2.0, 4.0), 0.5),
    ///     ScoredDestination::new(Destination::new("B", 30.0, 5.0, 1.0, 5.0), 0.7),
    /// ];
    /// let summary = TripSummary::from_route(&route, 3.0);
    /// assert_eq!(summary.total_locations, 2);
    /// assert_eq!(summary.total_visit_time, 90.0);
    /// assert_eq!(summary.total_trip_time, 113.0);
    /// assert_eq!(summary.average_rating, 4.5);
    /// ```
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "summaries sum minute values and divide by the stop count"
    )]
    #[must_use]
    pub fn from_route(route: &[ScoredDestination], estimated_return_minutes: f64) -> Self {
        if route.is_empty() {
            return Self::default();
        }
        let stops = route.iter().map(|s| &s.destination);
        let total_visit_time = stops.clone().map(|d| d.visit_time).sum::<f64>();
        let total_travel_time = stops.clone().map(|d| d.travel_time_from_source).sum::<f64>();
        let total_distance = stops.clone().map(|d| d.distance_from_source).sum::<f64>();
        let count = route.len() as f64;
        Self {
            total_locations: route.len(),
            total_visit_time,
            total_travel_time,
            total_distance,
            average_rating: stops.map(|d| d.rating).sum::<f64>() / count,
            average_score: route.iter().map(|s| s.score).sum::<f64>() / count,
            total_trip_time: total_visit_time + total_travel_time + estimated_return_minutes,
        }
    }
}

/// The outcome of planning a trip.
///
/// Admitted and skipped destinations partition the candidate set; the
/// skipped ones did not fit the remaining time budget.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TripPlan {
    /// Echo of the request's start location.
    pub start_location: String,
    /// Echo of the request's home address.
    pub home_address: String,
    /// Admitted stops in admission order.
    pub optimized_route: Vec<ScoredDestination>,
    /// Candidates rejected for lack of time.
    pub skipped_destinations: Vec<ScoredDestination>,
    /// Unused minutes after the return leg; never negative.
    pub remaining_time: f64,
    /// Minutes from the final stop back to the home address.
    pub estimated_return_time: f64,
    /// Aggregate figures over the route.
    pub summary: TripSummary,
    /// Recommender entries that were malformed and left out.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub excluded_records: Vec<ExcludedRecord>,
}

impl TripPlan {
    /// Names of admitted stops in visiting order.
    pub fn route_names(&self) -> impl Iterator<Item = &str> {
        self.optimized_route
            .iter()
            .map(|s| s.destination.name.as_str())
    }

    /// Names of skipped candidates.
    pub fn skipped_names(&self) -> impl Iterator<Item = &str> {
        self.skipped_destinations
            .iter()
            .map(|s| s.destination.name.as_str())
    }
}
