//! Merging of model narrative with exact statistics

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

use crate::config::{EngineConfig, NOT_AVAILABLE};
use crate::models::cohort::CohortStatistics;

/// Output of the narrative-generation collaborator
///
/// The quantitative fields are estimates and are never trusted; they are
/// only kept to report where the estimate disagreed with the exact value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelEstimate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_patients: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_dmft: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_deft: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_province: Option<Value>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub findings: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub recommendations: Vec<Value>,
    /// Any other sections of the narrative
    #[serde(flatten)]
    pub sections: BTreeMap<String, Value>,
}

/// A model estimate that was replaced by the exact value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverriddenField {
    pub field: String,
    pub estimated: Value,
    pub exact: Value,
}

/// Report combining exact statistics with narrative text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    pub total_patients: usize,
    pub average_dmft: f64,
    pub average_deft: f64,
    pub top_province: String,
    pub summary: String,
    pub findings: Vec<Value>,
    pub recommendations: Vec<Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sections: BTreeMap<String, Value>,
    pub statistics: CohortStatistics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overridden_fields: Vec<OverriddenField>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub discarded_fields: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Builds final reports where exact numbers always win
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    not_available_label: String,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self {
            not_available_label: NOT_AVAILABLE.to_string(),
        }
    }
}

impl ReportAssembler {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            not_available_label: config.not_available_label.clone(),
        }
    }

    /// Merge a model estimate with exact statistics, stamped with the current time
    #[must_use]
    pub fn merge(&self, estimate: Option<ModelEstimate>, exact: &CohortStatistics) -> FinalReport {
        self.merge_at(estimate, exact, Utc::now())
    }

    /// Merge with an explicit generation timestamp
    #[must_use]
    pub fn merge_at(
        &self,
        estimate: Option<ModelEstimate>,
        exact: &CohortStatistics,
        generated_at: DateTime<Utc>,
    ) -> FinalReport {
        let estimate = estimate.unwrap_or_default();

        // Empty statistics already carry zeros; only the province needs a label
        let top_province = exact.top_province_or(&self.not_available_label).to_string();

        let mut overridden_fields = Vec::new();
        let exact_values = [
            ("totalPatients", &estimate.total_patients, json!(exact.total_patients)),
            ("averageDmft", &estimate.average_dmft, json!(exact.average_dmft)),
            ("averageDeft", &estimate.average_deft, json!(exact.average_deft)),
            ("topProvince", &estimate.top_province, Value::String(top_province.clone())),
        ];
        for (field, estimated, exact_value) in exact_values {
            if let Some(estimated) = estimated {
                if !same_value(estimated, &exact_value) {
                    warn!(
                        "Model estimate for {field} ({estimated}) replaced by exact value ({exact_value})"
                    );
                    overridden_fields.push(OverriddenField {
                        field: field.to_string(),
                        estimated: estimated.clone(),
                        exact: exact_value,
                    });
                }
            }
        }

        // Numbers anywhere in the narrative are unverified estimates
        let mut discarded_fields = Vec::new();
        let findings = strip_list(estimate.findings, "findings", &mut discarded_fields);
        let recommendations =
            strip_list(estimate.recommendations, "recommendations", &mut discarded_fields);
        let sections: BTreeMap<String, Value> = estimate
            .sections
            .into_iter()
            .filter_map(|(key, value)| {
                strip_numbers(value, &key, &mut discarded_fields).map(|value| (key, value))
            })
            .collect();
        if !discarded_fields.is_empty() {
            debug!("Discarded unverified numeric fields from model output: {discarded_fields:?}");
        }

        let mut statistics = exact.clone();
        statistics.top_province.clone_from(&top_province);

        FinalReport {
            total_patients: exact.total_patients,
            average_dmft: exact.average_dmft,
            average_deft: exact.average_deft,
            top_province,
            summary: estimate.summary,
            findings,
            recommendations,
            sections,
            statistics,
            overridden_fields,
            discarded_fields,
            generated_at,
        }
    }
}

/// Remove every numeric leaf under `value`, recording its path
///
/// Returns `None` when `value` itself is a number.
fn strip_numbers(value: Value, path: &str, discarded: &mut Vec<String>) -> Option<Value> {
    match value {
        Value::Number(_) => {
            discarded.push(path.to_string());
            None
        }
        Value::Array(items) => Some(Value::Array(strip_list(items, path, discarded))),
        Value::Object(map) => Some(Value::Object(
            map.into_iter()
                .filter_map(|(key, value)| {
                    strip_numbers(value, &format!("{path}.{key}"), discarded)
                        .map(|value| (key, value))
                })
                .collect(),
        )),
        other => Some(other),
    }
}

fn strip_list(items: Vec<Value>, path: &str, discarded: &mut Vec<String>) -> Vec<Value> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| strip_numbers(item, &format!("{path}[{i}]"), discarded))
        .collect()
}

/// Text field that tolerates `null` and non-string values
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// List field that tolerates `null` and a single bare item
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        other => vec![other],
    })
}

/// Numeric comparison tolerant of `3` vs `3.0`; strings compare exactly
fn same_value(estimated: &Value, exact: &Value) -> bool {
    match (estimated.as_f64(), exact.as_f64()) {
        (Some(a), Some(b)) => (a - b).abs() < f64::EPSILON,
        _ => estimated == exact,
    }
}
