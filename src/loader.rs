//! Boundary deserialization of in-memory patient batches
//!
//! The batch must be a JSON array of patient objects, or an object with a
//! `patients` array. A batch that has any other shape is rejected as a
//! whole; problems inside a well-shaped record are left to the scoring
//! pipeline, which isolates them.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;

use crate::algorithm::report::ModelEstimate;
use crate::error::{DentalError, Result};
use crate::models::patient::RawPatientRecord;

/// Parse a batch of raw patient records from a JSON string
pub fn parse_cohort_json(input: &str) -> Result<Vec<RawPatientRecord>> {
    let value: Value = serde_json::from_str(input)?;
    records_from_value(value)
}

/// Read a batch of raw patient records from any reader
pub fn load_cohort_json<R: Read>(reader: R) -> Result<Vec<RawPatientRecord>> {
    let value: Value = serde_json::from_reader(reader)?;
    records_from_value(value)
}

/// Read a batch of raw patient records from a JSON file
pub fn load_cohort_file(path: &Path) -> Result<Vec<RawPatientRecord>> {
    let file = File::open(path)?;
    let records = load_cohort_json(BufReader::new(file))?;
    log::info!("Loaded {} patient records from {}", records.len(), path.display());
    Ok(records)
}

/// Read the narrative collaborator's output from a JSON file
pub fn load_narrative_file(path: &Path) -> Result<ModelEstimate> {
    let file = File::open(path)?;
    let estimate = serde_json::from_reader(BufReader::new(file))?;
    Ok(estimate)
}

fn records_from_value(value: Value) -> Result<Vec<RawPatientRecord>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("patients") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(DentalError::InvalidInput(
                    "expected an array of patients or an object with a 'patients' array"
                        .to_string(),
                ));
            }
        },
        other => {
            return Err(DentalError::InvalidInput(format!(
                "expected an array of patients, got {}",
                type_name(&other)
            )));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                return Err(DentalError::InvalidInput(format!(
                    "patient record {i} is {}, expected an object",
                    type_name(&item)
                )));
            }
            serde_json::from_value(item)
                .map_err(|e| DentalError::InvalidInput(format!("patient record {i}: {e}")))
        })
        .collect()
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
