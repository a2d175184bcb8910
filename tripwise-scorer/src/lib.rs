//! Feasibility scoring for Tripwise candidates.
//!
//! [`FeasibilityScorer`] implements [`Scorer`](tripwise_core::Scorer) by
//! blending five normalised signals: visitor rating, proximity to the start,
//! time cost, preference match and popularity. Distance and time are
//! normalised against the largest value in the candidate set, so scores are
//! only comparable within a single planning run.
//!
//! # Examples
//!
//! ```
//! use tripwise_core::{Destination, Preferences, Scorer};
//! use tripwise_scorer::FeasibilityScorer;
//!
//! let candidates = [
//!     Destination::new("Louvre", 120.0, 15.0, 2.5, 4.7),
//!     Destination::new("Sacré-Cœur", 60.0, 25.0, 4.0, 4.5),
//! ];
//! let scored = FeasibilityScorer::new().score_all(&candidates, &Preferences::default());
//! assert_eq!(scored.len(), 2);
//! assert!(scored.iter().all(|s| (0.0..=1.0).contains(&s.score)));
//! ```

#![forbid(unsafe_code)]

mod feasibility;
mod weights;

pub use feasibility::FeasibilityScorer;
pub use weights::{PreferenceScores, ScoreWeights};
