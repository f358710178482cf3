//! Cohort-level statistics
//!
//! These values are derived on every request and never stored.

use serde::Serialize;

use crate::config::NOT_AVAILABLE;

/// Number of patients per province
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvinceCount {
    pub province: String,
    pub count: usize,
}

/// Number of patients per survey category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Number of patients per gender
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenderCount {
    pub gender: String,
    pub count: usize,
}

/// Definite-yes tallies of clinical flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagTotals {
    pub bleeding_gums: usize,
    pub oral_lesion: usize,
    pub treatment_needed: usize,
    pub treatment_urgent: usize,
    pub referral: usize,
}

/// Population statistics for one cohort
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortStatistics {
    /// Every input record, whether or not an index could be computed
    pub total_patients: usize,
    /// Mean DMF-T over records with a known value, 2 decimal places
    pub average_dmft: f64,
    /// Mean def-t over records with a known value, 2 decimal places
    pub average_deft: f64,
    pub dmft_known_count: usize,
    pub deft_known_count: usize,
    /// Province with the most patients, or the placeholder label when no
    /// province is known
    pub top_province: String,
    pub category_distribution: Vec<CategoryCount>,
    pub gender_distribution: Vec<GenderCount>,
    pub province_ranking: Vec<ProvinceCount>,
    pub referral_total: usize,
    pub flag_totals: FlagTotals,
}

impl CohortStatistics {
    /// Statistics of a cohort with no records
    #[must_use]
    pub fn empty() -> Self {
        Self::empty_with(NOT_AVAILABLE)
    }

    /// Statistics of a cohort with no records, labelled with `placeholder`
    #[must_use]
    pub fn empty_with(placeholder: &str) -> Self {
        Self {
            total_patients: 0,
            average_dmft: 0.0,
            average_deft: 0.0,
            dmft_known_count: 0,
            deft_known_count: 0,
            top_province: placeholder.to_string(),
            category_distribution: Vec::new(),
            gender_distribution: Vec::new(),
            province_ranking: Vec::new(),
            referral_total: 0,
            flag_totals: FlagTotals::default(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_patients == 0
    }

    /// Whether at least one record had a usable province
    #[must_use]
    pub fn has_top_province(&self) -> bool {
        !self.province_ranking.is_empty()
    }

    /// Top province, or `placeholder` when no province is known
    #[must_use]
    pub fn top_province_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        if self.has_top_province() {
            &self.top_province
        } else {
            placeholder
        }
    }
}
