//! Parallel cohort scoring and aggregation
//!
//! Large cohorts are split into fixed-size shards on a bounded rayon pool.
//! Each shard produces a [`CohortAccumulator`] and shards are combined with
//! [`CohortAccumulator::merge`], so the result is identical to a sequential
//! pass over the same records.

use std::time::Instant;

use indicatif::ParallelProgressIterator;
use log::info;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::algorithm::cohort::accumulator::CohortAccumulator;
use crate::algorithm::cohort::aggregator::CohortAggregator;
use crate::algorithm::dental::score_patient;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::cohort::CohortStatistics;
use crate::models::patient::{PatientScore, RawPatientRecord};
use crate::utils::logging::{
    create_main_progress_bar, finish_progress_bar, log_operation_complete, log_operation_start,
};

/// Build the worker pool described by `config`
pub fn build_pool(config: &EngineConfig) -> Result<ThreadPool> {
    config.validate()?;
    let pool = ThreadPoolBuilder::new()
        .num_threads(config.effective_threads())
        .thread_name(|i| format!("dental-epi-{i}"))
        .build()?;
    Ok(pool)
}

/// Score every record in parallel, preserving input order
pub fn score_cohort_parallel(
    records: &[RawPatientRecord],
    config: &EngineConfig,
) -> Result<Vec<PatientScore>> {
    let pool = build_pool(config)?;
    Ok(score_in_pool(&pool, records, config))
}

fn score_in_pool(
    pool: &ThreadPool,
    records: &[RawPatientRecord],
    config: &EngineConfig,
) -> Vec<PatientScore> {
    log_operation_start("Scoring", &format!("{} patient records", records.len()));
    let start = Instant::now();

    let scores: Vec<PatientScore> = pool.install(|| {
        if config.show_progress {
            let pb = create_main_progress_bar(records.len() as u64, Some("Scoring patients"));
            let scores: Vec<PatientScore> = records
                .par_iter()
                .map(score_patient)
                .progress_with(pb.clone())
                .collect();
            finish_progress_bar(&pb, Some("Scoring complete"));
            scores
        } else {
            records.par_iter().map(score_patient).collect()
        }
    });

    log_operation_complete("scored", "patient records", scores.len(), Some(start.elapsed()));
    scores
}

/// Aggregate scores, sharding across the pool when the cohort is large
pub fn aggregate_parallel(
    scores: &[PatientScore],
    config: &EngineConfig,
) -> Result<CohortStatistics> {
    config.validate()?;
    if scores.len() < config.parallel_threshold {
        return Ok(CohortAggregator::aggregate_with(scores, config));
    }

    let pool = build_pool(config)?;
    Ok(aggregate_in_pool(&pool, scores, config))
}

fn aggregate_in_pool(
    pool: &ThreadPool,
    scores: &[PatientScore],
    config: &EngineConfig,
) -> CohortStatistics {
    if scores.len() < config.parallel_threshold {
        return CohortAggregator::aggregate_with(scores, config);
    }

    info!(
        "Aggregating {} patients in shards of {} on {} threads",
        scores.len(),
        config.shard_size,
        pool.current_num_threads()
    );
    let accumulator = pool.install(|| accumulate_shards(scores, config.shard_size));
    CohortAggregator::finish(&accumulator, config)
}

/// Accumulate fixed-size shards in parallel and reduce them
#[must_use]
pub fn accumulate_shards(scores: &[PatientScore], shard_size: usize) -> CohortAccumulator {
    let shard_size = shard_size.max(1);
    scores
        .par_chunks(shard_size)
        .enumerate()
        .map(|(shard, chunk)| {
            let mut accumulator = CohortAccumulator::starting_at(shard * shard_size);
            accumulator.extend(chunk);
            accumulator
        })
        .reduce(CohortAccumulator::new, CohortAccumulator::merge)
}

/// Scores and statistics for one cohort
#[derive(Debug, Clone)]
pub struct CohortAnalysis {
    pub scores: Vec<PatientScore>,
    pub statistics: CohortStatistics,
}

/// Score and aggregate a raw batch in one call, on a single worker pool
pub fn analyze_cohort(
    records: &[RawPatientRecord],
    config: &EngineConfig,
) -> Result<CohortAnalysis> {
    let pool = build_pool(config)?;
    Ok(analyze_cohort_in(&pool, records, config))
}

/// Score and aggregate a raw batch on an existing pool
///
/// `config` must already be validated, as [`build_pool`] does.
#[must_use]
pub fn analyze_cohort_in(
    pool: &ThreadPool,
    records: &[RawPatientRecord],
    config: &EngineConfig,
) -> CohortAnalysis {
    let scores = score_in_pool(pool, records, config);
    let statistics = aggregate_in_pool(pool, &scores, config);
    CohortAnalysis { scores, statistics }
}
