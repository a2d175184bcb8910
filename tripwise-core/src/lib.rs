//! Core domain types for the Tripwise engine.
//!
//! The crate defines the trip request and plan model, the validation that
//! guards it, and the extension points the rest of the workspace implements:
//! [`Scorer`] ranks candidates, [`Planner`] turns a request into a
//! [`TripPlan`], and [`Recommender`] sources candidates from an external
//! service.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod destination;
pub mod plan;
mod planner;
pub mod preferences;
pub mod recommender;
pub mod request;
mod scorer;
pub mod time_format;

pub use destination::{
    Category, DEFAULT_POPULARITY, Destination, DestinationError, DestinationRecord,
    UnknownCategoryError,
};
pub use plan::{ScoredDestination, TripPlan, TripSummary};
pub use planner::{PlanError, Planner};
pub use preferences::Preferences;
pub use recommender::{ExcludedRecord, RecommendationBatch, Recommender, UpstreamError};
pub use request::{TripQuery, TripRequest, TripRequestPayload, ValidationError};
pub use scorer::Scorer;
pub use time_format::format_minutes;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
