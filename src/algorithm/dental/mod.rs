//! Per-patient dental scoring
//!
//! Raw survey records are turned into typed records and scored here. Every
//! step is pure, so records can be scored in any order or in parallel.

pub mod codec;
pub mod flags;
pub mod index;
pub mod score_text;

use log::debug;
use serde_json::Value;

use crate::error::ScoringIssue;
use crate::models::dental_index::DentalIndexResult;
use crate::models::patient::{
    DEFT_SCORE_FIELD, DMFT_SCORE_FIELD, Demographics, Gender, PatientDentalRecord, PatientScore,
    RawDemographics, RawPatientRecord, ScoreSource,
};
use crate::models::tooth::Dentition;
use codec::ToothStatusCodec;
use flags::ClinicalFlagExtractor;
use index::IndexCalculator;
use score_text::{DEF_LABELS, DMF_LABELS, LegacyScore, ScoreTextParser};

/// Build a typed record from raw input, collecting non-fatal issues
#[must_use]
pub fn build_record(raw: &RawPatientRecord) -> (PatientDentalRecord, Vec<ScoringIssue>) {
    let (chart, mut issues) = ToothStatusCodec::decode_chart(&raw.odontogram);
    let demographics = normalize_demographics(&raw.demographics, &mut issues);

    let record = PatientDentalRecord {
        patient_id: raw.patient_id.clone(),
        chart,
        flags: ClinicalFlagExtractor::extract(&raw.flags),
        demographics,
        dmft_text: raw.dmft_text.clone(),
        deft_text: raw.deft_text.clone(),
        extra: raw.extra.clone(),
    };

    (record, issues)
}

/// Score a typed record
///
/// A recorded tooth chart always takes precedence; the legacy summary text
/// is only read for records without one.
#[must_use]
pub fn score_record(record: &PatientDentalRecord) -> (PatientScore, Vec<ScoringIssue>) {
    let mut issues = Vec::new();

    let mut score = if !record.chart.is_empty() {
        if record.dmft_text.is_some() || record.deft_text.is_some() {
            debug!(
                "Patient {}: tooth chart present, ignoring legacy score text",
                record.patient_id.as_deref().unwrap_or("?")
            );
        }
        PatientScore::from_index(
            IndexCalculator::compute(record),
            record.flags.clone(),
            record.demographics.clone(),
        )
    } else {
        let dmft = parse_legacy(
            record.dmft_text.as_deref(),
            DMFT_SCORE_FIELD,
            DMF_LABELS,
            Dentition::Permanent,
            &mut issues,
        );
        let deft = parse_legacy(
            record.deft_text.as_deref(),
            DEFT_SCORE_FIELD,
            DEF_LABELS,
            Dentition::Primary,
            &mut issues,
        );

        match (dmft, deft) {
            (Some(permanent), Some(primary))
                if permanent.is_consistent() && primary.is_consistent() =>
            {
                let index = DentalIndexResult::from_components(
                    permanent.components.unwrap_or_default(),
                    primary.components.unwrap_or_default(),
                );
                let mut score = PatientScore::from_index(
                    index,
                    record.flags.clone(),
                    record.demographics.clone(),
                );
                score.source = ScoreSource::LegacyText;
                score
            }
            _ => PatientScore::from_totals(
                dmft.and_then(|s| s.total),
                deft.and_then(|s| s.total),
                record.flags.clone(),
                record.demographics.clone(),
            ),
        }
    };

    score.patient_id = record.patient_id.clone();
    score.extra = record.extra.clone();
    (score, issues)
}

/// Run the full per-patient pipeline on a raw record
#[must_use]
pub fn score_patient(raw: &RawPatientRecord) -> PatientScore {
    let (record, mut issues) = build_record(raw);
    let (mut score, scoring_issues) = score_record(&record);
    issues.extend(scoring_issues);
    score.issues = issues;
    score
}

/// Score every record on the calling thread, preserving input order
#[must_use]
pub fn score_cohort(records: &[RawPatientRecord]) -> Vec<PatientScore> {
    records.iter().map(score_patient).collect()
}

fn parse_legacy(
    text: Option<&str>,
    field: &str,
    labels: [&str; 3],
    dentition: Dentition,
    issues: &mut Vec<ScoringIssue>,
) -> Option<LegacyScore> {
    let text = text?;
    // A total above the tooth count of the dentition is as unusable as no total
    let score = ScoreTextParser::parse_breakdown(text, labels).bounded(dentition);
    if score.total.is_none() {
        let issue = ScoringIssue::UnparsableScoreText {
            field: field.to_string(),
            text: text.to_string(),
        };
        issue.log();
        issues.push(issue);
    }
    Some(score)
}

fn normalize_demographics(raw: &RawDemographics, issues: &mut Vec<ScoringIssue>) -> Demographics {
    let mut malformed = |field: &str, value: &Value| {
        let issue = ScoringIssue::MalformedDemographic {
            field: field.to_string(),
            value: value.to_string(),
        };
        issue.log();
        issues.push(issue);
    };

    let province = match raw.province.as_ref() {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            malformed("province", other);
            None
        }
    };

    let gender = match raw.gender.as_ref() {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(value) => {
            let code = match value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            };
            let gender = code.as_deref().and_then(Gender::from_code);
            if gender.is_none() {
                malformed("gender", value);
            }
            gender
        }
    };

    let category = match raw.category.as_ref() {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => {
            malformed("category", other);
            None
        }
    };

    Demographics {
        province,
        gender,
        category,
    }
}
