//! Patient records, from raw survey input to scored result
//!
//! [`RawPatientRecord`] is the boundary shape: lenient field types, every
//! unrecognised survey attribute kept in `extra`. [`PatientDentalRecord`] is
//! the typed record the scoring pipeline works on, and [`PatientScore`] is
//! what comes out of it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ScoringIssue;
use crate::models::dental_index::DentalIndexResult;
use crate::models::flags::ClinicalFlags;
use crate::models::tooth::{Dentition, ToothPosition, ToothStatus};

/// Field name of the legacy permanent-teeth score text
pub const DMFT_SCORE_FIELD: &str = "DMF-T Score";
/// Field name of the legacy primary-teeth score text
pub const DEFT_SCORE_FIELD: &str = "def-t Score";

/// Raw clinical flags as submitted by the survey form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClinicalFlags {
    #[serde(default, alias = "bleeding_gums", skip_serializing_if = "Option::is_none")]
    pub bleeding_gums: Option<Value>,
    #[serde(default, alias = "oral_lesion", skip_serializing_if = "Option::is_none")]
    pub oral_lesion: Option<Value>,
    #[serde(default, alias = "treatment_need", skip_serializing_if = "Option::is_none")]
    pub treatment_need: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral: Option<Value>,
    #[serde(default, alias = "referral_type", skip_serializing_if = "Option::is_none")]
    pub referral_type: Option<Value>,
}

/// Raw demographic attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDemographics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
}

/// One patient as delivered by the data collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPatientRecord {
    #[serde(
        default,
        alias = "id",
        alias = "patient_id",
        deserialize_with = "string_or_number"
    )]
    pub patient_id: Option<String>,
    /// Tooth position -> single-character status code
    #[serde(default)]
    pub odontogram: BTreeMap<String, Value>,
    #[serde(default)]
    pub flags: RawClinicalFlags,
    #[serde(default)]
    pub demographics: RawDemographics,
    #[serde(rename = "DMF-T Score", default, skip_serializing_if = "Option::is_none")]
    pub dmft_text: Option<String>,
    #[serde(rename = "def-t Score", default, skip_serializing_if = "Option::is_none")]
    pub deft_text: Option<String>,
    /// Survey attributes the engine does not interpret
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "patient id must be a string or number, got {other}"
        ))),
    }
}

/// Gender as coded by the survey ("1" male, "2" female)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Decode the survey code
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(Self::Male),
            "2" => Some(Self::Female),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Male => "1",
            Self::Female => "2",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
        }
    }
}

/// Typed demographic attributes; `None` means absent or unusable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Demographics {
    pub province: Option<String>,
    pub gender: Option<Gender>,
    pub category: Option<String>,
}

/// Partial mapping from tooth position to classified status
///
/// Positions that were never recorded read back as
/// [`ToothStatus::NotRecorded`]; they are never defaulted to healthy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToothChart {
    teeth: BTreeMap<ToothPosition, ToothStatus>,
}

impl ToothChart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a status. Recording `NotRecorded` removes the entry.
    pub fn set(&mut self, position: ToothPosition, status: ToothStatus) {
        if status == ToothStatus::NotRecorded {
            self.teeth.remove(&position);
        } else {
            self.teeth.insert(position, status);
        }
    }

    #[must_use]
    pub fn status(&self, position: ToothPosition) -> ToothStatus {
        self.teeth
            .get(&position)
            .copied()
            .unwrap_or(ToothStatus::NotRecorded)
    }

    /// Recorded entries in position order
    pub fn iter(&self) -> impl Iterator<Item = (ToothPosition, ToothStatus)> + '_ {
        self.teeth.iter().map(|(p, s)| (*p, *s))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.teeth.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teeth.is_empty()
    }

    /// Number of recorded teeth in one dentition
    #[must_use]
    pub fn recorded_in(&self, dentition: Dentition) -> usize {
        self.teeth
            .keys()
            .filter(|p| p.dentition() == dentition)
            .count()
    }
}

impl FromIterator<(ToothPosition, ToothStatus)> for ToothChart {
    fn from_iter<I: IntoIterator<Item = (ToothPosition, ToothStatus)>>(iter: I) -> Self {
        let mut chart = Self::new();
        for (position, status) in iter {
            chart.set(position, status);
        }
        chart
    }
}

/// Typed patient record, re-scored in full whenever it changes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatientDentalRecord {
    pub patient_id: Option<String>,
    pub chart: ToothChart,
    pub flags: ClinicalFlags,
    pub demographics: Demographics,
    pub dmft_text: Option<String>,
    pub deft_text: Option<String>,
    pub extra: BTreeMap<String, Value>,
}

/// Where a patient's index values came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreSource {
    /// Computed from the tooth chart
    Structured,
    /// Parsed from legacy summary text
    LegacyText,
    /// Neither a chart nor usable text was available
    Unavailable,
}

/// Per-patient scoring output, the unit the cohort aggregator consumes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientScore {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    /// Full component breakdown when available
    pub index: Option<DentalIndexResult>,
    /// DMF-T total used for the cohort average
    pub dmft: Option<u32>,
    /// def-t total used for the cohort average
    pub deft: Option<u32>,
    pub source: ScoreSource,
    pub flags: ClinicalFlags,
    pub demographics: Demographics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ScoringIssue>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl PatientScore {
    /// Score built directly from a computed index
    #[must_use]
    pub fn from_index(
        index: DentalIndexResult,
        flags: ClinicalFlags,
        demographics: Demographics,
    ) -> Self {
        Self {
            patient_id: None,
            index: Some(index),
            dmft: Some(index.dmf_total()),
            deft: Some(index.def_total()),
            source: ScoreSource::Structured,
            flags,
            demographics,
            issues: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Score carrying only totals (either may be missing)
    #[must_use]
    pub fn from_totals(
        dmft: Option<u32>,
        deft: Option<u32>,
        flags: ClinicalFlags,
        demographics: Demographics,
    ) -> Self {
        let source = if dmft.is_some() || deft.is_some() {
            ScoreSource::LegacyText
        } else {
            ScoreSource::Unavailable
        };
        Self {
            patient_id: None,
            index: None,
            dmft,
            deft,
            source,
            flags,
            demographics,
            issues: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}
