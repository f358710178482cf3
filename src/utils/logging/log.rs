//! Logging utilities
//!
//! This module provides standardized logging functions for operations.

use std::time::Duration;

use crate::models::patient::PatientScore;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `subject` - What the operation works on
pub fn log_operation_start(operation: &str, subject: &str) {
    log::info!("{operation} {subject}");
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Past-tense description of the operation
/// * `subject` - What was operated on
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    subject: &str,
    items: usize,
    elapsed: Option<Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!("Successfully {operation} {items} {subject} in {duration:?}");
    } else {
        log::info!("Successfully {operation} {items} {subject}");
    }
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `context` - Optional context related to the warning
pub fn log_warning(message: &str, context: Option<&str>) {
    if let Some(context) = context {
        log::warn!("{message}: {context}");
    } else {
        log::warn!("{message}");
    }
}

/// Log a one-line summary of the non-fatal issues found while scoring
///
/// Individual issues are already logged where they are detected.
pub fn log_issues(scores: &[PatientScore]) {
    let with_issues = scores.iter().filter(|s| !s.issues.is_empty()).count();
    if with_issues == 0 {
        return;
    }
    let total: usize = scores.iter().map(|s| s.issues.len()).sum();
    log_warning(
        "Records with isolated data problems",
        Some(&format!("{with_issues} records, {total} issues")),
    );
}
