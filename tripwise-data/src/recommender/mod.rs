//! HTTP-based destination recommenders.
//!
//! This module provides [`HttpRecommender`], an implementation of
//! [`tripwise_core::Recommender`] that asks a chat-completions gateway for
//! destinations suited to a travel context.
//!
//! # Architecture
//!
//! The [`Recommender`](tripwise_core::Recommender) trait is synchronous so
//! the planner stays embeddable in synchronous callers. The recommender
//! blocks on async HTTP calls internally. The gateway's reply is treated as
//! untrusted: each entry of the returned JSON array is validated on its own
//! and malformed entries are reported rather than failing the batch.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use tripwise_core::{Recommender, TripQuery};
//! use tripwise_data::recommender::{HttpRecommender, HttpRecommenderConfig};
//!
//! let config = HttpRecommenderConfig::new("https://gateway.example.com/v1", "secret", "gpt-4o-mini")
//!     .with_timeout(Duration::from_secs(20));
//! let recommender = HttpRecommender::with_config(config)?;
//! let batch = recommender.recommend(&TripQuery::new("Lisbon", 4.0))?;
//! println!("{} candidates", batch.destinations().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod gateway;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use gateway::{parse_recommendations, strip_code_fence};
pub use provider::{
    DEFAULT_USER_AGENT, HttpRecommender, HttpRecommenderConfig, RecommenderBuildError,
};
