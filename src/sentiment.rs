use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DreamError, Result};
use crate::models::JournalEntry;

pub const NEGATIVE_SET: &str = "negative";
pub const POSITIVE_SET: &str = "positive";

const DEFAULT_NEGATIVE: [&str; 7] = [
    "susah", "berat", "mahal", "capek", "bingung", "gagal", "stress",
];
const DEFAULT_POSITIVE: [&str; 6] = ["senang", "happy", "lancar", "bisa", "akhirnya", "semangat"];

/// Named keyword sets used for the journal polarity scan.
///
/// The file form is a JSON object mapping set names to substring lists, e.g.
/// `{"negative": ["tired"], "positive": ["finally"]}`. Both sets must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Vec<String>>", into = "BTreeMap<String, Vec<String>>")]
pub struct Lexicon {
    negative: Vec<String>,
    positive: Vec<String>,
}

impl Lexicon {
    pub fn new<N, P, S>(negative: N, positive: P) -> Self
    where
        N: IntoIterator<Item = S>,
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            negative: normalize(negative),
            positive: normalize(positive),
        }
    }

    pub fn from_sets(mut sets: BTreeMap<String, Vec<String>>) -> Result<Self> {
        let negative = sets
            .remove(NEGATIVE_SET)
            .ok_or_else(|| DreamError::Lexicon(format!("missing `{NEGATIVE_SET}` set")))?;
        let positive = sets
            .remove(POSITIVE_SET)
            .ok_or_else(|| DreamError::Lexicon(format!("missing `{POSITIVE_SET}` set")))?;
        if let Some(extra) = sets.keys().next() {
            tracing::warn!(set = %extra, "ignoring unknown keyword set");
        }
        Ok(Self::new(negative, positive))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let lexicon: Lexicon = serde_json::from_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            negative = lexicon.negative.len(),
            positive = lexicon.positive.len(),
            "loaded lexicon"
        );
        Ok(lexicon)
    }

    pub fn negative(&self) -> &[String] {
        &self.negative
    }

    pub fn positive(&self) -> &[String] {
        &self.positive
    }

    /// +1 for each entry containing a positive keyword, -1 for each containing a
    /// negative one. An entry can count both ways.
    pub fn score(&self, logs: &[JournalEntry]) -> i64 {
        logs.iter()
            .map(|entry| {
                let text = entry.text.to_lowercase();
                let positive = i64::from(contains_any(&text, &self.positive));
                let negative = i64::from(contains_any(&text, &self.negative));
                positive - negative
            })
            .sum()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(DEFAULT_NEGATIVE, DEFAULT_POSITIVE)
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for Lexicon {
    type Error = DreamError;

    fn try_from(sets: BTreeMap<String, Vec<String>>) -> Result<Self> {
        Self::from_sets(sets)
    }
}

impl From<Lexicon> for BTreeMap<String, Vec<String>> {
    fn from(lexicon: Lexicon) -> Self {
        BTreeMap::from([
            (NEGATIVE_SET.to_string(), lexicon.negative),
            (POSITIVE_SET.to_string(), lexicon.positive),
        ])
    }
}

// Keywords are matched against lower-cased text, so store them lower-cased.
// Empty keywords would match every entry.
fn normalize<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|word| word.as_ref().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(text: &str) -> JournalEntry {
        JournalEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            text: text.to_string(),
        }
    }

    #[test]
    fn entries_count_once_per_polarity() {
        let lexicon = Lexicon::default();
        let logs = vec![entry("Susah dan berat, mahal pula")];
        assert_eq!(lexicon.score(&logs), -1);
    }

    #[test]
    fn mixed_entry_cancels_out() {
        let lexicon = Lexicon::default();
        let logs = vec![entry("Akhirnya beli, tapi mahal")];
        assert_eq!(lexicon.score(&logs), 0);
    }

    #[test]
    fn matching_ignores_case() {
        let lexicon = Lexicon::default();
        let logs = vec![entry("HAPPY banget"), entry("Semangat!")];
        assert_eq!(lexicon.score(&logs), 2);
    }

    #[test]
    fn empty_and_neutral_entries_score_zero() {
        let lexicon = Lexicon::default();
        let logs = vec![entry(""), entry("Keyboard udah dateng.")];
        assert_eq!(lexicon.score(&logs), 0);
    }

    #[test]
    fn custom_lexicon_parses_from_json() {
        let lexicon: Lexicon =
            serde_json::from_str(r#"{"negative": ["Tired"], "positive": ["finally", ""]}"#)
                .unwrap();
        assert_eq!(lexicon.negative(), ["tired".to_string()]);
        assert_eq!(lexicon.positive(), ["finally".to_string()]);
        assert_eq!(lexicon.score(&[entry("so tired today")]), -1);
    }

    #[test]
    fn missing_set_is_rejected() {
        let result: std::result::Result<Lexicon, _> =
            serde_json::from_str(r#"{"negative": ["tired"]}"#);
        assert!(result.is_err());
    }
}
