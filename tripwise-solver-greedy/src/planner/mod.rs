//! `GreedyPlanner` implementation.

use log::{debug, info};
use tripwise_core::{PlanError, Planner, Scorer, TripPlan, TripRequest, TripSummary};

use crate::allocator::allocate;

/// Planner that admits the best-scoring candidates that fit the budget.
///
/// The planner holds no mutable state, so one instance can serve concurrent
/// requests.
///
/// # Examples
/// ```
/// use tripwise_core::{Destination, Planner, TripQuery, TripRequest};
/// use tripwise_scorer::FeasibilityScorer;
/// use tripwise_solver_greedy::GreedyPlanner;
///
/// let planner = GreedyPlanner::new(FeasibilityScorer::new());
/// let request = TripRequest::new(
///     TripQuery::new("Paris", 2.0),
///     vec![Destination::new("Louvre", 90.0, 15.0, 2.5, 4.7).with_distance_to_source(2.5)],
/// );
/// let plan = planner.plan(&request)?;
/// assert_eq!(plan.route_names().collect::<Vec<_>>(), ["Louvre"]);
/// # Ok::<(), tripwise_core::PlanError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyPlanner<C>
where
    C: Scorer,
{
    scorer: C,
}

impl<C> GreedyPlanner<C>
where
    C: Scorer,
{
    /// Construct a planner around `scorer`.
    #[must_use]
    pub const fn new(scorer: C) -> Self {
        Self { scorer }
    }

    /// The scorer used to rank candidates.
    #[must_use]
    pub const fn scorer(&self) -> &C {
        &self.scorer
    }
}

impl<C> Planner for GreedyPlanner<C>
where
    C: Scorer,
{
    fn plan(&self, request: &TripRequest) -> Result<TripPlan, PlanError> {
        request.validate()?;
        let query = &request.query;
        let budget = query.available_minutes();
        debug!(
            "planning {} candidates from '{}' within {budget:.1} minutes",
            request.destinations.len(),
            query.start_location
        );

        let scored = self
            .scorer
            .score_all(&request.destinations, &query.preferences);
        let allocation = allocate(scored, budget);
        let summary =
            TripSummary::from_route(&allocation.accepted, allocation.estimated_return_minutes);

        info!(
            "planned {} of {} candidates from '{}', {:.1} minutes to spare",
            allocation.accepted.len(),
            request.destinations.len(),
            query.start_location,
            allocation.remaining_minutes
        );

        Ok(TripPlan {
            start_location: query.start_location.clone(),
            home_address: query.home_address.clone(),
            optimized_route: allocation.accepted,
            skipped_destinations: allocation.skipped,
            remaining_time: allocation.remaining_minutes,
            estimated_return_time: allocation.estimated_return_minutes,
            summary,
            excluded_records: request.excluded.clone(),
        })
    }
}
