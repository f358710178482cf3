//! Error handling for the scoring engine.
//!
//! Two kinds of failure exist. [`DentalError`] is a caller contract violation
//! (malformed batch, bad configuration) and stops the call. [`ScoringIssue`]
//! records a per-record malformation that was isolated: the record is kept,
//! only the affected figure is left out.

use std::{fmt, io};

/// Specialized error type for the scoring engine
#[derive(Debug, thiserror::Error)]
pub enum DentalError {
    /// Input batch could not be deserialized into patient records
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON error at the input boundary
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Tooth position outside the canonical permanent and primary ranges
    #[error("Invalid tooth position: {0}")]
    InvalidToothPosition(String),

    /// Engine configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Worker pool could not be constructed
    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for scoring engine operations
pub type Result<T> = std::result::Result<T, DentalError>;

/// A non-fatal problem found while scoring or aggregating.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScoringIssue {
    /// Status code not present in the table for the tooth's dentition
    UnknownToothCode { position: u8, code: String },
    /// Chart key that is not one of the canonical tooth positions
    InvalidToothPosition { raw: String },
    /// Legacy score text without a usable `Total:` value
    UnparsableScoreText { field: String, text: String },
    /// Demographic attribute present but not usable for grouping
    MalformedDemographic { field: String, value: String },
    /// Aggregation ran over zero records
    EmptyCohort,
}

impl ScoringIssue {
    /// Emit this issue through the logging facade
    pub fn log(&self) {
        log::warn!("{self}");
    }
}

impl fmt::Display for ScoringIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownToothCode { position, code } => {
                write!(f, "Unknown status code '{code}' for tooth {position}; tooth excluded")
            }
            Self::InvalidToothPosition { raw } => {
                write!(f, "Invalid tooth position '{raw}'; entry skipped")
            }
            Self::UnparsableScoreText { field, text } => {
                write!(f, "Unparsable {field} text '{text}'; excluded from that average")
            }
            Self::MalformedDemographic { field, value } => {
                write!(f, "Malformed {field} value '{value}'; excluded from {field} distribution")
            }
            Self::EmptyCohort => write!(f, "Empty cohort; reporting explicit defaults"),
        }
    }
}
