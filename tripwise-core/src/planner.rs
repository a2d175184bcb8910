use thiserror::Error;

use crate::{TripPlan, TripRequest, UpstreamError, ValidationError};

/// Errors returned while producing a [`TripPlan`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Request parameters were missing or out of range.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),
    /// Sourcing candidates from a recommender failed.
    #[error("recommender failure: {0}")]
    Upstream(#[from] UpstreamError),
}

impl PlanError {
    /// Stable identifier suitable for a client-facing error body.
    ///
    /// Validation failures map to `invalid_request`; upstream failures keep
    /// their [`UpstreamError::code`].
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "invalid_request",
            Self::Upstream(err) => err.code(),
        }
    }
}

/// Turn a validated request into a trip plan.
///
/// Implementations should return [`PlanError::Validation`] for invalid
/// parameters rather than panicking, and must be `Send + Sync` so a single
/// planner can serve concurrent requests.
pub trait Planner: Send + Sync {
    /// Plan `request`, producing a trip or an error.
    ///
    /// # Errors
    /// Returns [`PlanError`] when the request fails validation.
    fn plan(&self, request: &TripRequest) -> Result<TripPlan, PlanError>;
}
