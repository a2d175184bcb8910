//! Benchmark support utilities for the greedy planner.
//!
//! Provides deterministic candidate generation so benchmark runs are
//! reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tripwise_core::{Category, Destination};

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Longest on-site visit generated, in minutes.
const MAX_VISIT_MINUTES: f64 = 180.0;

/// Furthest candidate from the start, in kilometres.
const MAX_DISTANCE_KM: f64 = 25.0;

/// Minutes per kilometre used to derive inbound travel times (40 km/h).
const MINUTES_PER_KM: f64 = 1.5;

/// Generate `count` well-formed candidates from `seed`.
#[must_use]
pub fn generate_candidates(count: usize, seed: u64) -> Vec<Destination> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let km = rng.gen_range(0.0..MAX_DISTANCE_KM);
            let back_km = rng.gen_range(0.0..MAX_DISTANCE_KM);
            #[expect(clippy::float_arithmetic, reason = "travel time follows distance")]
            let travel = km * MINUTES_PER_KM;
            let category = Category::ALL
                .get(rng.gen_range(0..Category::ALL.len()))
                .copied()
                .unwrap_or(Category::Cultural);
            Destination::new(
                format!("candidate-{i}"),
                rng.gen_range(10.0..MAX_VISIT_MINUTES),
                travel,
                km,
                rng.gen_range(0.0..=5.0),
            )
            .with_distance_to_source(back_km)
            .with_popularity(rng.gen_range(1.0..=10.0))
            .with_category(category)
        })
        .collect()
}
