#[cfg(test)]
mod property_tests {
    use std::collections::BTreeMap;

    use dental_epi::algorithm::cohort::accumulate_shards;
    use dental_epi::models::{
        ClinicalFlags, Demographics, FlagValue, Gender, PatientScore, TreatmentNeed,
    };
    use dental_epi::{CohortAccumulator, CohortAggregator, RawPatientRecord, score_patient};
    use proptest::prelude::*;
    use serde_json::Value;

    const PROVINCES: [&str; 14] = [
        "Jawa Barat",
        "Jawa Tengah",
        "Jawa Timur",
        "Bali",
        "Aceh",
        "Papua",
        "Banten",
        "Riau",
        "Lampung",
        "Maluku",
        "Gorontalo",
        "Bengkulu",
        "Jambi",
        "Sumatera Barat",
    ];
    const CATEGORIES: [&str; 4] = ["SD", "SMP", "SMA", "Lansia"];
    const PERMANENT_CODES: [&str; 11] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "x"];
    const PRIMARY_CODES: [&str; 7] = ["A", "B", "C", "D", "E", "b", "7"];

    fn flag_strategy() -> impl Strategy<Value = FlagValue> {
        prop_oneof![Just(FlagValue::Yes), Just(FlagValue::No), Just(FlagValue::Unknown)]
    }

    fn flags_strategy() -> impl Strategy<Value = ClinicalFlags> {
        (
            flag_strategy(),
            flag_strategy(),
            flag_strategy(),
            prop_oneof![
                Just(TreatmentNeed::None),
                Just(TreatmentNeed::NeededNotUrgent),
                Just(TreatmentNeed::NeededUrgent),
                Just(TreatmentNeed::Unknown),
            ],
        )
            .prop_map(|(bleeding_gums, oral_lesion, referral, treatment_need)| ClinicalFlags {
                bleeding_gums,
                oral_lesion,
                treatment_need,
                referral,
                referral_type: None,
            })
    }

    fn demographics_strategy() -> impl Strategy<Value = Demographics> {
        (
            prop::option::of(prop::sample::select(PROVINCES.to_vec())),
            prop::option::of(prop_oneof![Just(Gender::Male), Just(Gender::Female)]),
            prop::option::of(prop::sample::select(CATEGORIES.to_vec())),
        )
            .prop_map(|(province, gender, category)| Demographics {
                province: province.map(str::to_string),
                gender,
                category: category.map(str::to_string),
            })
    }

    fn scores_strategy() -> impl Strategy<Value = Vec<PatientScore>> {
        prop::collection::vec(
            (
                prop::option::of(0u32..=32),
                prop::option::of(0u32..=20),
                flags_strategy(),
                demographics_strategy(),
            ),
            0..80,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .map(|(dmft, deft, flags, demographics)| {
                    PatientScore::from_totals(dmft, deft, flags, demographics)
                })
                .collect()
        })
    }

    fn odontogram_strategy() -> impl Strategy<Value = BTreeMap<String, Value>> {
        let permanent = ((1u8..=4, 1u8..=8), prop::sample::select(PERMANENT_CODES.to_vec()))
            .prop_map(|((q, t), code)| (format!("{q}{t}"), Value::from(code)));
        let primary = ((5u8..=8, 1u8..=5), prop::sample::select(PRIMARY_CODES.to_vec()))
            .prop_map(|((q, t), code)| (format!("{q}{t}"), Value::from(code)));
        prop::collection::vec(prop_oneof![permanent, primary], 0..52)
            .prop_map(|entries| entries.into_iter().collect())
    }

    proptest! {
        /// Property: splitting a cohort and merging the halves matches a single pass.
        #[test]
        fn merge_matches_sequential(scores in scores_strategy(), split in 0usize..60) {
            let split = split.min(scores.len());
            let (left, right) = scores.split_at(split);

            let mut a = CohortAccumulator::new();
            a.extend(left);
            let mut b = CohortAccumulator::starting_at(left.len());
            b.extend(right);

            let expected = CohortAggregator::aggregate(&scores);
            prop_assert_eq!(a.clone().merge(b.clone()).finish(10, "N/A"), expected.clone());
            prop_assert_eq!(b.merge(a).finish(10, "N/A"), expected);
        }

        /// Property: shard size never changes the result.
        #[test]
        fn shard_size_is_irrelevant(scores in scores_strategy(), shard_size in 1usize..16) {
            prop_assert_eq!(
                accumulate_shards(&scores, shard_size).finish(10, "N/A"),
                CohortAggregator::aggregate(&scores)
            );
        }

        /// Property: with more provinces than ranking slots, the truncated
        /// ranking does not depend on how the cohort was split.
        #[test]
        fn truncated_ranking_survives_merge(
            scores in scores_strategy(),
            split in 0usize..80,
            limit in 1usize..6,
            shard_size in 1usize..16,
        ) {
            let split = split.min(scores.len());
            let (left, right) = scores.split_at(split);

            let mut a = CohortAccumulator::new();
            a.extend(left);
            let mut b = CohortAccumulator::starting_at(left.len());
            b.extend(right);

            let mut whole = CohortAccumulator::new();
            whole.extend(&scores);
            let expected = whole.finish(limit, "N/A");

            prop_assert!(expected.province_ranking.len() <= limit);
            prop_assert_eq!(b.clone().merge(a.clone()).finish(limit, "N/A"), expected.clone());
            prop_assert_eq!(a.merge(b).finish(limit, "N/A"), expected.clone());
            prop_assert_eq!(accumulate_shards(&scores, shard_size).finish(limit, "N/A"), expected);
        }

        /// Property: the cohort mean lies between the smallest and largest known value.
        #[test]
        fn mean_is_bounded_by_known_values(scores in scores_strategy()) {
            let stats = CohortAggregator::aggregate(&scores);
            let known: Vec<u32> = scores.iter().filter_map(|s| s.dmft).collect();
            prop_assert_eq!(stats.dmft_known_count, known.len());
            if let (Some(min), Some(max)) = (known.iter().min(), known.iter().max()) {
                prop_assert!(stats.average_dmft >= f64::from(*min));
                prop_assert!(stats.average_dmft <= f64::from(*max));
            } else {
                prop_assert_eq!(stats.average_dmft, 0.0);
            }
        }

        /// Property: every index total is the sum of its components and
        /// never exceeds the number of teeth in its dentition.
        #[test]
        fn index_totals_are_component_sums(odontogram in odontogram_strategy()) {
            let raw = RawPatientRecord {
                odontogram,
                ..Default::default()
            };
            let score = score_patient(&raw);
            let Some(index) = score.index else {
                prop_assert!(raw.odontogram.is_empty());
                return Ok(());
            };

            prop_assert_eq!(index.dmf_total(), index.decayed() + index.missing() + index.filled());
            prop_assert_eq!(
                index.def_total(),
                index.decayed_primary() + index.extracted_primary() + index.filled_primary()
            );
            prop_assert!(index.dmf_total() <= 32);
            prop_assert!(index.def_total() <= 20);
            prop_assert_eq!(score_patient(&raw), score);
        }
    }
}
