//! Cohort-level aggregation
//!
//! Per-patient scores are folded into mergeable partial state and finished
//! into [`CohortStatistics`](crate::models::cohort::CohortStatistics).

pub mod accumulator;
pub mod aggregator;
pub mod parallel;

pub use accumulator::{CohortAccumulator, GroupCounter, MeanTally};
pub use aggregator::{CohortAggregator, DEFAULT_RANKING_LIMIT};
pub use parallel::{
    CohortAnalysis, accumulate_shards, aggregate_parallel, analyze_cohort, analyze_cohort_in,
    build_pool, score_cohort_parallel,
};
