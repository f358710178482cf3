//! Tooth status code tables
//!
//! Permanent teeth use the WHO numeric codes 0-9. Primary teeth use the WHO
//! letter codes A-E, with the numeric codes 0-4 accepted as aliases. Each
//! code is only ever looked up in the table of its tooth's dentition.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ScoringIssue;
use crate::models::patient::ToothChart;
use crate::models::tooth::{Dentition, PermanentStatus, PrimaryStatus, ToothPosition, ToothStatus};

/// Classifies raw per-tooth codes into clinical categories
pub struct ToothStatusCodec;

impl ToothStatusCodec {
    /// Classify a code, reporting unknown codes as an issue
    ///
    /// An empty code means nothing was recorded for the tooth.
    pub fn classify(position: ToothPosition, raw_code: &str) -> Result<ToothStatus, ScoringIssue> {
        let code = raw_code.trim();
        if code.is_empty() {
            return Ok(ToothStatus::NotRecorded);
        }

        let status = match position.dentition() {
            Dentition::Permanent => permanent_status(code).map(ToothStatus::Permanent),
            Dentition::Primary => primary_status(code).map(ToothStatus::Primary),
        };

        status.ok_or_else(|| ScoringIssue::UnknownToothCode {
            position: position.value(),
            code: code.to_string(),
        })
    }

    /// Classify a code; unknown codes become [`ToothStatus::Other`] with a warning
    #[must_use]
    pub fn decode(position: ToothPosition, raw_code: &str) -> ToothStatus {
        Self::classify(position, raw_code).unwrap_or_else(|issue| {
            issue.log();
            ToothStatus::Other(position.dentition())
        })
    }

    /// Decode a whole odontogram, collecting every non-fatal issue
    ///
    /// Keys that are not canonical positions are skipped. Unknown codes are
    /// kept in the chart as [`ToothStatus::Other`] so they stay visible but
    /// never count towards an index.
    #[must_use]
    pub fn decode_chart(odontogram: &BTreeMap<String, Value>) -> (ToothChart, Vec<ScoringIssue>) {
        let mut chart = ToothChart::new();
        let mut issues = Vec::new();

        for (raw_position, raw_code) in odontogram {
            let Ok(position) = raw_position.parse::<ToothPosition>() else {
                let issue = ScoringIssue::InvalidToothPosition {
                    raw: raw_position.clone(),
                };
                issue.log();
                issues.push(issue);
                continue;
            };

            let code = match raw_code {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            };

            match Self::classify(position, &code) {
                Ok(status) => chart.set(position, status),
                Err(issue) => {
                    issue.log();
                    issues.push(issue);
                    chart.set(position, ToothStatus::Other(position.dentition()));
                }
            }
        }

        (chart, issues)
    }
}

fn permanent_status(code: &str) -> Option<PermanentStatus> {
    let status = match code {
        "0" => PermanentStatus::Healthy,
        "1" => PermanentStatus::Decayed,
        "2" => PermanentStatus::FilledWithDecay,
        "3" => PermanentStatus::FilledWithoutDecay,
        "4" => PermanentStatus::MissingDueToDecay,
        "5" => PermanentStatus::MissingOther,
        "6" => PermanentStatus::Sealant,
        "7" => PermanentStatus::Prosthesis,
        "8" => PermanentStatus::Unerupted,
        "9" => PermanentStatus::Other,
        _ => return None,
    };
    Some(status)
}

fn primary_status(code: &str) -> Option<PrimaryStatus> {
    let status = match code.to_ascii_uppercase().as_str() {
        "A" | "0" => PrimaryStatus::Healthy,
        "B" | "1" => PrimaryStatus::Decayed,
        "C" | "2" => PrimaryStatus::FilledWithDecay,
        "D" | "3" => PrimaryStatus::FilledWithoutDecay,
        "E" | "4" => PrimaryStatus::ExtractedDueToDecay,
        _ => return None,
    };
    Some(status)
}
