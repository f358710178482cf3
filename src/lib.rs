//! A Rust library for scoring dental epidemiological survey data.
//!
//! Raw per-tooth clinical codes are converted into the WHO DMF-T (permanent
//! teeth) and def-t (primary teeth) indices, and per-patient results are
//! aggregated into reproducible cohort statistics.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::EngineConfig;
pub use error::{DentalError, Result, ScoringIssue};
pub use models::{
    ClinicalFlags, CohortStatistics, DentalIndexResult, PatientDentalRecord, PatientScore,
    RawPatientRecord, ToothPosition, ToothStatus,
};

// Per-patient scoring
pub use algorithm::dental::codec::ToothStatusCodec;
pub use algorithm::dental::flags::ClinicalFlagExtractor;
pub use algorithm::dental::index::IndexCalculator;
pub use algorithm::dental::score_text::ScoreTextParser;
pub use algorithm::dental::{build_record, score_cohort, score_patient, score_record};

// Cohort aggregation and reporting
pub use algorithm::cohort::{
    CohortAccumulator, CohortAggregator, aggregate_parallel, analyze_cohort,
    score_cohort_parallel,
};
pub use algorithm::report::{FinalReport, ModelEstimate, ReportAssembler};

// Input
pub use loader::{load_cohort_file, load_cohort_json, parse_cohort_json};
