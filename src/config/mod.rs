//! Configuration for the scoring engine.

use std::fmt;

use crate::error::{DentalError, Result};

/// Label used wherever a statistic cannot be computed
pub const NOT_AVAILABLE: &str = "N/A";

/// Default number of provinces kept in the ranking
pub const DEFAULT_RANKING_LIMIT: usize = 10;

/// Configuration for cohort scoring and aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Worker threads for parallel shards (`None` uses all available cores)
    pub worker_threads: Option<usize>,
    /// Number of records per parallel shard
    pub shard_size: usize,
    /// Cohorts smaller than this are aggregated on the calling thread
    pub parallel_threshold: usize,
    /// Maximum number of entries in the province ranking
    pub province_ranking_limit: usize,
    /// Draw a progress bar while scoring
    pub show_progress: bool,
    /// Placeholder for statistics that cannot be computed
    pub not_available_label: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            shard_size: 1024,
            parallel_threshold: 4096,
            province_ranking_limit: DEFAULT_RANKING_LIMIT,
            show_progress: false,
            not_available_label: NOT_AVAILABLE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Check the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.shard_size == 0 {
            return Err(DentalError::InvalidConfig(
                "shard_size must be greater than zero".to_string(),
            ));
        }
        if self.province_ranking_limit == 0 {
            return Err(DentalError::InvalidConfig(
                "province_ranking_limit must be greater than zero".to_string(),
            ));
        }
        if self.worker_threads == Some(0) {
            return Err(DentalError::InvalidConfig(
                "worker_threads must be greater than zero when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of worker threads the pool will be built with
    #[must_use]
    pub fn effective_threads(&self) -> usize {
        self.worker_threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engine Configuration:")?;
        writeln!(f, "  Worker Threads: {}", self.effective_threads())?;
        writeln!(f, "  Shard Size: {}", self.shard_size)?;
        writeln!(f, "  Parallel Threshold: {}", self.parallel_threshold)?;
        writeln!(f, "  Province Ranking Limit: {}", self.province_ranking_limit)?;
        writeln!(f, "  Show Progress: {}", self.show_progress)?;
        Ok(())
    }
}
