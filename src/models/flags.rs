//! Auxiliary clinical flags recorded alongside the tooth chart

use serde::{Deserialize, Serialize};

/// A yes/no observation that may not have been recorded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagValue {
    Yes,
    No,
    #[default]
    Unknown,
}

impl FlagValue {
    /// True only for a definite "yes"
    #[must_use]
    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

/// Clinician's assessment of treatment need
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TreatmentNeed {
    None,
    NeededNotUrgent,
    NeededUrgent,
    #[default]
    Unknown,
}

impl TreatmentNeed {
    /// True for either urgency level of a definite need
    #[must_use]
    pub const fn is_needed(self) -> bool {
        matches!(self, Self::NeededNotUrgent | Self::NeededUrgent)
    }
}

/// Normalized clinical flags for one patient
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalFlags {
    pub bleeding_gums: FlagValue,
    pub oral_lesion: FlagValue,
    pub treatment_need: TreatmentNeed,
    pub referral: FlagValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_type: Option<String>,
}
