//! The recommender boundary: sourcing candidate destinations from an
//! external service.

mod batch;
mod error;

pub use batch::{ExcludedRecord, RecommendationBatch};
pub use error::UpstreamError;

use crate::TripQuery;

/// Fetch candidate destinations for a travel context.
///
/// Implementations typically call a remote service. They must validate what
/// they receive entry by entry, keeping well-formed destinations and
/// reporting malformed ones through [`RecommendationBatch`], and must map
/// every transport or service failure onto [`UpstreamError`].
///
/// # Examples
///
/// ```rust
/// use tripwise_core::{
///     Destination, RecommendationBatch, Recommender, TripQuery, UpstreamError,
/// };
///
/// struct FixedRecommender;
///
/// impl Recommender for FixedRecommender {
///     fn recommend(&self, _query: &TripQuery) -> Result<RecommendationBatch, UpstreamError> {
///         Ok(RecommendationBatch::new(vec![Destination::new(
///             "Notre-Dame", 40.0, 10.0, 1.0, 4.8,
///         )]))
///     }
/// }
///
/// let batch = FixedRecommender.recommend(&TripQuery::new("Paris", 2.0))?;
/// assert_eq!(batch.destinations().len(), 1);
/// # Ok::<(), UpstreamError>(())
/// ```
pub trait Recommender: Send + Sync {
    /// Return candidates suited to `query`.
    ///
    /// # Errors
    /// Returns [`UpstreamError`] when the service is unreachable, rejects
    /// the call or replies with an unusable payload.
    fn recommend(&self, query: &TripQuery) -> Result<RecommendationBatch, UpstreamError>;
}
