//! Partial cohort state and its reducer
//!
//! A [`CohortAccumulator`] holds counts and sums only, never averages, so
//! two partial states can be merged exactly. Each group remembers the global
//! input index where it first appeared; ties in the province ranking and the
//! order of the distributions are resolved by that index, which keeps
//! `merge` associative and commutative across shards. Groups that share a
//! first index (only possible when two accumulators both start at the same
//! offset) fall back to key order.

use std::hash::Hash;

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::models::cohort::{
    CategoryCount, CohortStatistics, FlagTotals, GenderCount, ProvinceCount,
};
use crate::models::flags::{ClinicalFlags, TreatmentNeed};
use crate::models::patient::{Gender, PatientScore};

/// Count of one group plus the input index where it first appeared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GroupTally {
    count: usize,
    first_seen: usize,
}

/// Frequency counter with first-occurrence ordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCounter<K: Eq + Hash> {
    groups: FxHashMap<K, GroupTally>,
}

impl<K: Eq + Hash> Default for GroupCounter<K> {
    fn default() -> Self {
        Self {
            groups: FxHashMap::default(),
        }
    }
}

impl<K: Eq + Hash + Ord + Clone> GroupCounter<K> {
    /// Count one occurrence of `key` seen at global input `index`
    pub fn record(&mut self, key: &K, index: usize) {
        if let Some(tally) = self.groups.get_mut(key) {
            tally.count += 1;
            tally.first_seen = tally.first_seen.min(index);
        } else {
            self.groups.insert(
                key.clone(),
                GroupTally {
                    count: 1,
                    first_seen: index,
                },
            );
        }
    }

    pub fn merge(&mut self, other: Self) {
        for (key, tally) in other.groups {
            self.groups
                .entry(key)
                .and_modify(|existing| {
                    existing.count += tally.count;
                    existing.first_seen = existing.first_seen.min(tally.first_seen);
                })
                .or_insert(tally);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in order of first appearance
    #[must_use]
    pub fn in_first_seen_order(&self) -> Vec<(&K, usize)> {
        self.groups
            .iter()
            .sorted_by(|(ka, a), (kb, b)| {
                a.first_seen
                    .cmp(&b.first_seen)
                    .then_with(|| ka.cmp(kb))
            })
            .map(|(key, tally)| (key, tally.count))
            .collect()
    }

    /// Groups by descending count, ties in order of first appearance
    #[must_use]
    pub fn ranked(&self) -> Vec<(&K, usize)> {
        self.groups
            .iter()
            .sorted_by(|(ka, a), (kb, b)| {
                b.count
                    .cmp(&a.count)
                    .then_with(|| a.first_seen.cmp(&b.first_seen))
                    .then_with(|| ka.cmp(kb))
            })
            .map(|(key, tally)| (key, tally.count))
            .collect()
    }
}

/// Sum and count of the known values of one index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeanTally {
    sum: u64,
    count: usize,
}

impl MeanTally {
    /// Add a value; `None` touches neither numerator nor denominator
    pub fn record(&mut self, value: Option<u32>) {
        if let Some(value) = value {
            self.sum += u64::from(value);
            self.count += 1;
        }
    }

    #[must_use]
    pub const fn merged(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            count: self.count + other.count,
        }
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Mean rounded half-up to two decimal places, `0` when nothing is known
    #[must_use]
    pub fn rounded_mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        // Integer arithmetic: round(100 * sum / count) with halves going up
        let count = self.count as u128;
        let hundredths = (200 * u128::from(self.sum) + count) / (2 * count);
        hundredths as f64 / 100.0
    }
}

/// Mergeable partial statistics for a slice of the cohort
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CohortAccumulator {
    next_index: usize,
    total_patients: usize,
    dmft: MeanTally,
    deft: MeanTally,
    provinces: GroupCounter<String>,
    categories: GroupCounter<String>,
    genders: GroupCounter<Gender>,
    flag_totals: FlagTotals,
}

impl CohortAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulator whose first record sits at global input index `offset`
    #[must_use]
    pub fn starting_at(offset: usize) -> Self {
        Self {
            next_index: offset,
            ..Self::default()
        }
    }

    /// Add one scored patient
    pub fn push(&mut self, score: &PatientScore) {
        let index = self.next_index;
        self.next_index += 1;
        self.total_patients += 1;

        self.dmft.record(score.dmft);
        self.deft.record(score.deft);

        let demographics = &score.demographics;
        if let Some(province) = &demographics.province {
            self.provinces.record(province, index);
        }
        if let Some(category) = &demographics.category {
            self.categories.record(category, index);
        }
        if let Some(gender) = &demographics.gender {
            self.genders.record(gender, index);
        }

        record_flags(&mut self.flag_totals, &score.flags);
    }

    pub fn extend<'a, I>(&mut self, scores: I)
    where
        I: IntoIterator<Item = &'a PatientScore>,
    {
        for score in scores {
            self.push(score);
        }
    }

    /// Combine two partial states
    ///
    /// Input order is only preserved when each side was built with
    /// [`starting_at`](Self::starting_at) at its global offset.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.next_index = self.next_index.max(other.next_index);
        self.total_patients += other.total_patients;
        self.dmft = self.dmft.merged(other.dmft);
        self.deft = self.deft.merged(other.deft);
        self.provinces.merge(other.provinces);
        self.categories.merge(other.categories);
        self.genders.merge(other.genders);
        self.flag_totals = merge_flags(self.flag_totals, other.flag_totals);
        self
    }

    #[must_use]
    pub const fn total_patients(&self) -> usize {
        self.total_patients
    }

    /// Final statistics, with at most `ranking_limit` provinces ranked
    ///
    /// `placeholder` stands in for the top province when none is known.
    #[must_use]
    pub fn finish(&self, ranking_limit: usize, placeholder: &str) -> CohortStatistics {
        if self.total_patients == 0 {
            return CohortStatistics::empty_with(placeholder);
        }

        let province_ranking: Vec<ProvinceCount> = self
            .provinces
            .ranked()
            .into_iter()
            .take(ranking_limit)
            .map(|(province, count)| ProvinceCount {
                province: province.clone(),
                count,
            })
            .collect();

        CohortStatistics {
            total_patients: self.total_patients,
            average_dmft: self.dmft.rounded_mean(),
            average_deft: self.deft.rounded_mean(),
            dmft_known_count: self.dmft.count(),
            deft_known_count: self.deft.count(),
            top_province: province_ranking
                .first()
                .map_or_else(|| placeholder.to_string(), |p| p.province.clone()),
            category_distribution: self
                .categories
                .in_first_seen_order()
                .into_iter()
                .map(|(category, count)| CategoryCount {
                    category: category.clone(),
                    count,
                })
                .collect(),
            gender_distribution: self
                .genders
                .in_first_seen_order()
                .into_iter()
                .map(|(gender, count)| GenderCount {
                    gender: gender.to_string(),
                    count,
                })
                .collect(),
            province_ranking,
            referral_total: self.flag_totals.referral,
            flag_totals: self.flag_totals,
        }
    }
}

fn record_flags(totals: &mut FlagTotals, flags: &ClinicalFlags) {
    totals.bleeding_gums += usize::from(flags.bleeding_gums.is_yes());
    totals.oral_lesion += usize::from(flags.oral_lesion.is_yes());
    totals.treatment_needed += usize::from(flags.treatment_need.is_needed());
    totals.treatment_urgent += usize::from(flags.treatment_need == TreatmentNeed::NeededUrgent);
    totals.referral += usize::from(flags.referral.is_yes());
}

const fn merge_flags(a: FlagTotals, b: FlagTotals) -> FlagTotals {
    FlagTotals {
        bleeding_gums: a.bleeding_gums + b.bleeding_gums,
        oral_lesion: a.oral_lesion + b.oral_lesion,
        treatment_needed: a.treatment_needed + b.treatment_needed,
        treatment_urgent: a.treatment_urgent + b.treatment_urgent,
        referral: a.referral + b.referral,
    }
}
