//! Index extraction from legacy summary text
//!
//! Records ingested without a tooth chart carry free-text summaries such as
//! `"D: 1, M: 0, F: 2, Total: 3"`. Only the first occurrence of a token is
//! used, and a value that is not a non-negative integer yields nothing.
//! Trailing punctuation after a number (`"Total: 3."`) is ignored.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::dental_index::IndexComponents;
use crate::models::tooth::Dentition;

static TOTAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bTotal\s*:\s*([^\s,;]*)").expect("valid total pattern"));

static LABELED_VALUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z]+)\s*:\s*([^\s,;]*)").expect("valid labeled value pattern")
});

/// Component labels of the DMF-T summary text
pub const DMF_LABELS: [&str; 3] = ["D", "M", "F"];
/// Component labels of the def-t summary text
pub const DEF_LABELS: [&str; 3] = ["d", "e", "f"];

/// Components and total read from one summary text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyScore {
    pub components: Option<IndexComponents>,
    pub total: Option<u32>,
}

impl LegacyScore {
    /// Components present and summing to the stated total
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        matches!(
            (self.components, self.total),
            (Some(c), Some(t)) if c.checked_total() == Some(t)
        )
    }

    /// Drop a total or breakdown larger than the tooth count of `dentition`
    #[must_use]
    pub fn bounded(self, dentition: Dentition) -> Self {
        let limit = u32::try_from(dentition.tooth_count()).unwrap_or(u32::MAX);
        Self {
            components: self
                .components
                .filter(|c| c.checked_total().is_some_and(|total| total <= limit)),
            total: self.total.filter(|total| *total <= limit),
        }
    }
}

/// Parser for legacy score summaries
pub struct ScoreTextParser;

impl ScoreTextParser {
    /// Extract the integer following the first `Total:` token
    #[must_use]
    pub fn parse_total(text: &str) -> Option<u32> {
        let captures = TOTAL_PATTERN.captures(text)?;
        parse_count(captures.get(1)?.as_str())
    }

    /// Extract the three labeled components and the total
    ///
    /// Labels are case-sensitive, so `D` and `d` are distinct.
    #[must_use]
    pub fn parse_breakdown(text: &str, labels: [&str; 3]) -> LegacyScore {
        let mut values: [Option<Option<u32>>; 3] = [None, None, None];

        for captures in LABELED_VALUE_PATTERN.captures_iter(text) {
            let (Some(label), Some(value)) = (captures.get(1), captures.get(2)) else {
                continue;
            };
            if let Some(slot) = labels.iter().position(|l| *l == label.as_str()) {
                if values[slot].is_none() {
                    values[slot] = Some(parse_count(value.as_str()));
                }
            }
        }

        let components = match values {
            [Some(Some(decayed)), Some(Some(missing)), Some(Some(filled))] => {
                Some(IndexComponents::new(decayed, missing, filled))
            }
            _ => None,
        };

        LegacyScore {
            components,
            total: Self::parse_total(text),
        }
    }
}

fn parse_count(raw: &str) -> Option<u32> {
    let raw = raw.trim_end_matches(|c: char| c.is_ascii_punctuation());
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
