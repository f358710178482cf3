//! DMF-T and def-t index values for one patient

use serde::Serialize;

/// Decayed/missing/filled counts for one dentition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexComponents {
    pub decayed: u32,
    pub missing: u32,
    pub filled: u32,
}

impl IndexComponents {
    #[must_use]
    pub const fn new(decayed: u32, missing: u32, filled: u32) -> Self {
        Self {
            decayed,
            missing,
            filled,
        }
    }

    /// Sum of the components, saturating at `u32::MAX`
    #[must_use]
    pub const fn total(self) -> u32 {
        self.decayed.saturating_add(self.missing).saturating_add(self.filled)
    }

    /// Sum of the components, `None` when it does not fit in a `u32`
    #[must_use]
    pub const fn checked_total(self) -> Option<u32> {
        match self.decayed.checked_add(self.missing) {
            Some(partial) => partial.checked_add(self.filled),
            None => None,
        }
    }
}

/// Immutable per-patient index result
///
/// Totals are always the sum of their components; the only way to build a
/// value is from components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DentalIndexResult {
    #[serde(rename = "D")]
    decayed: u32,
    #[serde(rename = "M")]
    missing: u32,
    #[serde(rename = "F")]
    filled: u32,
    #[serde(rename = "dmfTotal")]
    dmf_total: u32,
    #[serde(rename = "d")]
    decayed_primary: u32,
    #[serde(rename = "e")]
    extracted_primary: u32,
    #[serde(rename = "f")]
    filled_primary: u32,
    #[serde(rename = "defTotal")]
    def_total: u32,
}

impl DentalIndexResult {
    /// Build a result from the permanent (DMF) and primary (def) components
    #[must_use]
    pub const fn from_components(permanent: IndexComponents, primary: IndexComponents) -> Self {
        Self {
            decayed: permanent.decayed,
            missing: permanent.missing,
            filled: permanent.filled,
            dmf_total: permanent.total(),
            decayed_primary: primary.decayed,
            extracted_primary: primary.missing,
            filled_primary: primary.filled,
            def_total: primary.total(),
        }
    }

    /// D: decayed permanent teeth
    #[must_use]
    pub const fn decayed(&self) -> u32 {
        self.decayed
    }

    /// M: permanent teeth missing due to caries
    #[must_use]
    pub const fn missing(&self) -> u32 {
        self.missing
    }

    /// F: filled permanent teeth without decay
    #[must_use]
    pub const fn filled(&self) -> u32 {
        self.filled
    }

    #[must_use]
    pub const fn dmf_total(&self) -> u32 {
        self.dmf_total
    }

    /// d: decayed primary teeth
    #[must_use]
    pub const fn decayed_primary(&self) -> u32 {
        self.decayed_primary
    }

    /// e: primary teeth extracted due to caries
    #[must_use]
    pub const fn extracted_primary(&self) -> u32 {
        self.extracted_primary
    }

    /// f: filled primary teeth without decay
    #[must_use]
    pub const fn filled_primary(&self) -> u32 {
        self.filled_primary
    }

    #[must_use]
    pub const fn def_total(&self) -> u32 {
        self.def_total
    }

    #[must_use]
    pub const fn permanent_components(&self) -> IndexComponents {
        IndexComponents::new(self.decayed, self.missing, self.filled)
    }

    #[must_use]
    pub const fn primary_components(&self) -> IndexComponents {
        IndexComponents::new(self.decayed_primary, self.extracted_primary, self.filled_primary)
    }
}
