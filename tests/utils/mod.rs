use dental_epi::models::{ClinicalFlags, Demographics, PatientScore};
use dental_epi::{RawPatientRecord, parse_cohort_json};
use serde_json::{Value, json};

/// Parse a single raw record from a JSON value
#[must_use]
pub fn raw_record(value: Value) -> RawPatientRecord {
    serde_json::from_value(value).expect("valid raw patient record")
}

/// Parse a batch of raw records from a JSON value
#[must_use]
pub fn raw_batch(value: &Value) -> Vec<RawPatientRecord> {
    parse_cohort_json(&value.to_string()).expect("valid patient batch")
}

/// Raw record with an odontogram and nothing else
#[must_use]
pub fn charted_record(odontogram: Value) -> RawPatientRecord {
    raw_record(json!({ "odontogram": odontogram }))
}

/// Score with the given totals and province, no flags
#[must_use]
pub fn score_in(province: Option<&str>, dmft: Option<u32>, deft: Option<u32>) -> PatientScore {
    PatientScore::from_totals(
        dmft,
        deft,
        ClinicalFlags::default(),
        Demographics {
            province: province.map(str::to_string),
            ..Default::default()
        },
    )
}

/// A small survey batch mixing charted and legacy records
#[must_use]
pub fn survey_batch() -> Value {
    json!([
        {
            "patientId": "P-001",
            "odontogram": { "16": "1", "26": "2", "36": "3", "46": "4", "55": "B", "65": "C" },
            "flags": { "bleedingGums": true, "referral": "1", "referralType": "Puskesmas" },
            "demographics": { "province": "Jawa Barat", "gender": "1", "category": "SD" },
            "school": "SDN 1 Bandung"
        },
        {
            "patientId": "P-002",
            "odontogram": { "11": "0", "21": "0", "51": "A", "61": "D" },
            "flags": { "treatmentNeed": 2 },
            "demographics": { "province": "Bali", "gender": "2", "category": "SD" }
        },
        {
            "patientId": "P-003",
            "DMF-T Score": "D: 1, M: 0, F: 1, Total: 2",
            "def-t Score": "d: 0, e: 0, f: 0, Total: 0",
            "demographics": { "province": "Jawa Barat", "gender": "1", "category": "SMP" }
        },
        {
            "patientId": "P-004",
            "DMF-T Score": "not examined",
            "demographics": { "province": "Bali", "gender": "9" }
        }
    ])
}
