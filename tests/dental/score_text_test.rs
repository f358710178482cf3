#[cfg(test)]
mod tests {
    use crate::utils::raw_record;
    use dental_epi::models::ScoreSource;
    use dental_epi::{ScoreTextParser, ScoringIssue, score_patient};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_first_total_wins() {
        assert_eq!(ScoreTextParser::parse_total("Total: 3, Total: 5"), Some(3));
    }

    #[test]
    fn test_consistent_legacy_texts_give_full_breakdown() {
        let score = score_patient(&raw_record(json!({
            "DMF-T Score": "D: 1, M: 0, F: 2, Total: 3",
            "def-t Score": "d: 2, e: 1, f: 0, Total: 3"
        })));
        let index = score.index.expect("consistent texts produce an index");

        assert_eq!(score.source, ScoreSource::LegacyText);
        assert_eq!((index.decayed(), index.missing(), index.filled()), (1, 0, 2));
        assert_eq!(
            (
                index.decayed_primary(),
                index.extracted_primary(),
                index.filled_primary()
            ),
            (2, 1, 0)
        );
        assert_eq!(score.dmft, Some(3));
        assert_eq!(score.deft, Some(3));
    }

    #[test]
    fn test_inconsistent_breakdown_keeps_stated_total() {
        let score = score_patient(&raw_record(json!({
            "DMF-T Score": "D: 1, M: 1, F: 1, Total: 4",
            "def-t Score": "Total: 2"
        })));

        assert_eq!(score.index, None);
        assert_eq!(score.dmft, Some(4));
        assert_eq!(score.deft, Some(2));
        assert_eq!(score.source, ScoreSource::LegacyText);
    }

    #[test]
    fn test_unparsable_text_is_unknown_not_zero() {
        let score = score_patient(&raw_record(json!({
            "DMF-T Score": "Total: n/a",
            "def-t Score": "d: 0, e: 0, f: 0, Total: 0"
        })));

        assert_eq!(score.dmft, None);
        assert_eq!(score.deft, Some(0));
        assert_eq!(
            score.issues,
            vec![ScoringIssue::UnparsableScoreText {
                field: "DMF-T Score".to_string(),
                text: "Total: n/a".to_string(),
            }]
        );
    }

    #[test]
    fn test_lowercase_labels_do_not_feed_permanent_breakdown() {
        let score = score_patient(&raw_record(json!({
            "DMF-T Score": "d: 1, m: 0, f: 0, Total: 1",
            "def-t Score": "d: 0, e: 0, f: 0, Total: 0"
        })));
        assert_eq!(score.index, None);
        assert_eq!(score.dmft, Some(1));
    }
}
