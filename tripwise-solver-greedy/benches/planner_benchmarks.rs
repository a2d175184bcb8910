//! Criterion benchmarks for the greedy planner.
//!
//! Measures planning time across candidate set sizes to catch regressions in
//! scoring or allocation.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package tripwise-solver-greedy
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tripwise_core::{Planner, Preferences, TripQuery, TripRequest};
use tripwise_scorer::FeasibilityScorer;
use tripwise_solver_greedy::GreedyPlanner;

mod bench_support;

use bench_support::{BENCHMARK_SEED, generate_candidates};

/// Candidate set sizes to benchmark.
const PROBLEM_SIZES: &[usize] = &[10, 100, 1_000];

/// Time budget for benchmark requests (hours).
const AVAILABLE_HOURS: f64 = 8.0;

fn bench_plan_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_time");
    let planner = GreedyPlanner::new(FeasibilityScorer::new());

    for &size in PROBLEM_SIZES {
        let query = TripQuery::new("Benchmark Square", AVAILABLE_HOURS)
            .with_preferences(Preferences::new(["cultural", "food"]));
        let request = TripRequest::new(query, generate_candidates(size, BENCHMARK_SEED));

        let throughput_size = u64::try_from(size).unwrap_or(u64::MAX);
        group.throughput(Throughput::Elements(throughput_size));
        group.bench_with_input(BenchmarkId::new("candidates", size), &request, |b, req| {
            b.iter(|| {
                #[expect(
                    clippy::let_underscore_must_use,
                    reason = "Benchmarking plan performance, result is intentionally discarded"
                )]
                let _ = planner.plan(req);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_plan_times);
criterion_main!(benches);
