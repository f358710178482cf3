//! Sequential cohort aggregation

use log::info;

use crate::algorithm::cohort::accumulator::CohortAccumulator;
use crate::config::EngineConfig;
use crate::error::ScoringIssue;
use crate::models::cohort::CohortStatistics;
use crate::models::patient::PatientScore;

pub use crate::config::DEFAULT_RANKING_LIMIT;

/// Combines per-patient scores into population statistics
pub struct CohortAggregator;

impl CohortAggregator {
    /// Aggregate with the default configuration
    #[must_use]
    pub fn aggregate(scores: &[PatientScore]) -> CohortStatistics {
        Self::aggregate_with(scores, &EngineConfig::default())
    }

    /// Aggregate using the limits and labels from `config`
    #[must_use]
    pub fn aggregate_with(scores: &[PatientScore], config: &EngineConfig) -> CohortStatistics {
        Self::aggregate_iter(scores, config)
    }

    /// Aggregate any sequence of scores in a single pass
    ///
    /// Statistics are recomputed from scratch on every call.
    #[must_use]
    pub fn aggregate_iter<'a, I>(scores: I, config: &EngineConfig) -> CohortStatistics
    where
        I: IntoIterator<Item = &'a PatientScore>,
    {
        let mut accumulator = CohortAccumulator::new();
        accumulator.extend(scores);
        Self::finish(&accumulator, config)
    }

    /// Turn a (possibly merged) accumulator into final statistics
    #[must_use]
    pub fn finish(accumulator: &CohortAccumulator, config: &EngineConfig) -> CohortStatistics {
        let placeholder = config.not_available_label.as_str();
        if accumulator.total_patients() == 0 {
            ScoringIssue::EmptyCohort.log();
            return CohortStatistics::empty_with(placeholder);
        }

        let stats = accumulator.finish(config.province_ranking_limit, placeholder);
        info!(
            "Aggregated {} patients (DMF-T known for {}, def-t known for {})",
            stats.total_patients, stats.dmft_known_count, stats.deft_known_count
        );
        stats
    }
}
