use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatedEntry;
use crate::preprocess::fold;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Word,
    Language,
    Region,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "word" => Some(SortKey::Word),
            "language" => Some(SortKey::Language),
            "region" => Some(SortKey::Region),
            _ => None,
        }
    }

    fn key_of<'a>(&self, item: &'a AggregatedEntry) -> &'a str {
        match self {
            SortKey::Word => &item.entry.word,
            SortKey::Language => &item.language_name,
            SortKey::Region => item.effective_region().unwrap_or(""),
        }
    }
}

/// Order entries ascending by the folded sort key.
///
/// Missing keys compare as the empty string and so come first. The sort is
/// stable: entries whose folded keys are equal keep their input order, which
/// keeps page contents identical between re-renders.
pub fn sort_entries<'a>(entries: &[&'a AggregatedEntry], key: SortKey) -> Vec<&'a AggregatedEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_cached_key(|item| fold(key.key_of(item)));
    sorted
}
