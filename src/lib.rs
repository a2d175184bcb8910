//! Facade crate for the Tripwise trip-itinerary engine.
//!
//! This crate re-exports the core domain types and exposes the scorer,
//! planner and recommender implementations behind feature flags.

#![forbid(unsafe_code)]

pub use tripwise_core::{
    Category, Destination, DestinationError, DestinationRecord, ExcludedRecord, PlanError,
    Planner, Preferences, RecommendationBatch, Recommender, ScoredDestination, Scorer, TripPlan,
    TripQuery, TripRequest, TripRequestPayload, TripSummary, UpstreamError, ValidationError,
    format_minutes,
};

#[cfg(feature = "scorer")]
pub use tripwise_scorer::{FeasibilityScorer, PreferenceScores, ScoreWeights};

#[cfg(feature = "solver-greedy")]
pub use tripwise_solver_greedy::GreedyPlanner;

#[cfg(feature = "recommender-http")]
pub use tripwise_data::recommender::{HttpRecommender, HttpRecommenderConfig};
