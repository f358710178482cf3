//! Normalization of auxiliary clinical flags
//!
//! Survey forms submit flags as "0"/"1" strings, numbers or booleans.
//! Anything missing or unrecognised becomes `Unknown`, which never counts
//! as a positive finding.

use serde_json::Value;

use crate::models::flags::{ClinicalFlags, FlagValue, TreatmentNeed};
use crate::models::patient::RawClinicalFlags;

/// Maps raw flag values into [`ClinicalFlags`]
pub struct ClinicalFlagExtractor;

impl ClinicalFlagExtractor {
    #[must_use]
    pub fn extract(raw: &RawClinicalFlags) -> ClinicalFlags {
        ClinicalFlags {
            bleeding_gums: Self::flag(raw.bleeding_gums.as_ref()),
            oral_lesion: Self::flag(raw.oral_lesion.as_ref()),
            treatment_need: Self::treatment_need(raw.treatment_need.as_ref()),
            referral: Self::flag(raw.referral.as_ref()),
            referral_type: Self::referral_type(raw.referral_type.as_ref()),
        }
    }

    /// Normalize a single yes/no flag
    #[must_use]
    pub fn flag(raw: Option<&Value>) -> FlagValue {
        match raw {
            Some(Value::Bool(b)) => FlagValue::from(*b),
            Some(Value::Number(n)) => match n.as_u64() {
                Some(0) => FlagValue::No,
                Some(1) => FlagValue::Yes,
                _ => FlagValue::Unknown,
            },
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "y" | "ya" => FlagValue::Yes,
                "0" | "false" | "no" | "n" | "tidak" => FlagValue::No,
                _ => FlagValue::Unknown,
            },
            _ => FlagValue::Unknown,
        }
    }

    /// Normalize treatment need: 0 none, 1 needed, 2 needed urgently
    #[must_use]
    pub fn treatment_need(raw: Option<&Value>) -> TreatmentNeed {
        let code = match raw {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        match code {
            Some(0) => TreatmentNeed::None,
            Some(1) => TreatmentNeed::NeededNotUrgent,
            Some(2) => TreatmentNeed::NeededUrgent,
            _ => TreatmentNeed::Unknown,
        }
    }

    fn referral_type(raw: Option<&Value>) -> Option<String> {
        match raw {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }
}
