#[cfg(test)]
mod tests {
    use crate::utils::{charted_record, raw_record};
    use dental_epi::models::{FlagValue, Gender, ScoreSource, TreatmentNeed};
    use dental_epi::{IndexCalculator, ScoringIssue, build_record, score_patient};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_single_decayed_tooth_increments_decayed_only() {
        let score = score_patient(&charted_record(json!({ "16": "1" })));
        let index = score.index.expect("charted record has an index");

        assert_eq!(index.decayed(), 1);
        assert_eq!(index.missing(), 0);
        assert_eq!(index.filled(), 0);
        assert_eq!(index.dmf_total(), 1);
        assert_eq!(index.def_total(), 0);
        assert_eq!(score.source, ScoreSource::Structured);
    }

    #[test]
    fn test_mixed_dentition_chart() {
        let score = score_patient(&charted_record(json!({
            "16": "1", "26": "2", "36": "3", "46": "4", "17": "5", "27": "6",
            "55": "B", "65": "C", "75": "D", "85": "E", "54": "A"
        })));
        let index = score.index.expect("index");

        assert_eq!(
            (index.decayed(), index.missing(), index.filled()),
            (2, 1, 1)
        );
        assert_eq!(
            (
                index.decayed_primary(),
                index.extracted_primary(),
                index.filled_primary()
            ),
            (2, 1, 1)
        );
        assert_eq!(score.dmft, Some(4));
        assert_eq!(score.deft, Some(4));
    }

    #[test]
    fn test_totals_equal_component_sums() {
        let score = score_patient(&charted_record(json!({
            "11": "1", "12": "1", "13": "4", "14": "3", "15": "0",
            "51": "B", "52": "E", "53": "D"
        })));
        let index = score.index.expect("index");

        assert_eq!(
            index.dmf_total(),
            index.decayed() + index.missing() + index.filled()
        );
        assert_eq!(
            index.def_total(),
            index.decayed_primary() + index.extracted_primary() + index.filled_primary()
        );
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let raw = charted_record(json!({ "16": "1", "46": "4", "55": "C", "85": "x" }));
        assert_eq!(score_patient(&raw), score_patient(&raw));

        let (record, _) = build_record(&raw);
        assert_eq!(
            IndexCalculator::compute(&record),
            IndexCalculator::compute(&record)
        );
    }

    #[test]
    fn test_absent_teeth_are_not_healthy_or_missing() {
        let score = score_patient(&charted_record(json!({ "11": "0" })));
        let index = score.index.expect("index");
        assert_eq!(index.dmf_total(), 0);
        assert_eq!(index.def_total(), 0);

        let (record, _) = build_record(&charted_record(json!({ "11": "0" })));
        assert_eq!(record.chart.len(), 1);
    }

    #[test]
    fn test_unknown_code_is_reported_and_contributes_nothing() {
        let score = score_patient(&charted_record(json!({ "16": "Z", "26": "1" })));

        assert_eq!(score.dmft, Some(1));
        assert_eq!(
            score.issues,
            vec![ScoringIssue::UnknownToothCode {
                position: 16,
                code: "Z".to_string(),
            }]
        );
    }

    #[test]
    fn test_primary_letter_on_permanent_tooth_is_unknown() {
        let score = score_patient(&charted_record(json!({ "16": "B" })));
        assert_eq!(score.dmft, Some(0));
        assert_eq!(score.issues.len(), 1);
    }

    #[test]
    fn test_invalid_positions_are_skipped() {
        let score = score_patient(&charted_record(json!({ "19": "1", "ab": "1", "11": "1" })));

        assert_eq!(score.dmft, Some(1));
        assert_eq!(
            score.issues,
            vec![
                ScoringIssue::InvalidToothPosition {
                    raw: "19".to_string()
                },
                ScoringIssue::InvalidToothPosition {
                    raw: "ab".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_chart_takes_precedence_over_legacy_text() {
        let score = score_patient(&raw_record(json!({
            "odontogram": { "16": "1" },
            "DMF-T Score": "D: 5, M: 0, F: 0, Total: 5"
        })));
        assert_eq!(score.dmft, Some(1));
        assert_eq!(score.source, ScoreSource::Structured);
    }

    #[test]
    fn test_record_without_chart_or_text_is_unavailable() {
        let score = score_patient(&raw_record(json!({ "patientId": "P-9" })));

        assert_eq!(score.patient_id.as_deref(), Some("P-9"));
        assert_eq!(score.dmft, None);
        assert_eq!(score.deft, None);
        assert_eq!(score.source, ScoreSource::Unavailable);
        assert!(score.issues.is_empty());
    }

    #[test]
    fn test_flags_and_demographics_are_normalized() {
        let score = score_patient(&raw_record(json!({
            "flags": {
                "bleedingGums": "ya",
                "oralLesion": 0,
                "treatmentNeed": "1",
                "referral": true,
                "referralType": "  Rumah Sakit  "
            },
            "demographics": { "province": "Papua", "gender": 2, "category": 7 }
        })));

        assert_eq!(score.flags.bleeding_gums, FlagValue::Yes);
        assert_eq!(score.flags.oral_lesion, FlagValue::No);
        assert_eq!(score.flags.treatment_need, TreatmentNeed::NeededNotUrgent);
        assert_eq!(score.flags.referral, FlagValue::Yes);
        assert_eq!(score.flags.referral_type.as_deref(), Some("Rumah Sakit"));

        assert_eq!(score.demographics.province.as_deref(), Some("Papua"));
        assert_eq!(score.demographics.gender, Some(Gender::Female));
        assert_eq!(score.demographics.category.as_deref(), Some("7"));
    }

    #[test]
    fn test_malformed_gender_is_isolated() {
        let score = score_patient(&raw_record(json!({
            "odontogram": { "11": "1" },
            "demographics": { "province": "Aceh", "gender": "X" }
        })));

        assert_eq!(score.dmft, Some(1));
        assert_eq!(score.demographics.gender, None);
        assert_eq!(score.demographics.province.as_deref(), Some("Aceh"));
        assert!(matches!(
            score.issues.as_slice(),
            [ScoringIssue::MalformedDemographic { field, .. }] if field == "gender"
        ));
    }

    #[test]
    fn test_unknown_attributes_are_carried_through() {
        let score = score_patient(&raw_record(json!({
            "odontogram": { "11": "0" },
            "school": "SDN 3 Denpasar",
            "examiner": 12
        })));
        assert_eq!(score.extra.get("school"), Some(&json!("SDN 3 Denpasar")));
        assert_eq!(score.extra.get("examiner"), Some(&json!(12)));
    }
}
