//! Greedy time-budget planner for Tripwise.
//!
//! This crate provides [`GreedyPlanner`], the default implementation of the
//! [`Planner`](tripwise_core::Planner) trait. It scores every candidate with
//! a pluggable [`Scorer`](tripwise_core::Scorer), then walks them from best
//! to worst, admitting each one whose visit, inbound travel and estimated
//! return leg still fit the traveller's time budget.
//!
//! The admission rule lives in [`allocate`] so it can be exercised without a
//! scorer.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod allocator;
mod planner;

pub use allocator::{
    AVERAGE_SPEED_KMH, Allocation, allocate, reported_return_minutes, return_leg_minutes,
};
pub use planner::GreedyPlanner;
