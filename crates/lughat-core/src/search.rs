use lughat_types::non_empty;
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatedEntry;
use crate::preprocess::{contains_folded, fold};

/// A selector value that is either "everything" or one exact name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Empty input and the literal "all" select everything
    pub fn from_input(input: &str) -> Self {
        let value = input.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Only(v) => Some(v),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Exact comparison, `All` matches anything
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

/// Free-text query plus the two structured selectors of the dictionary page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub query: String,
    pub language: Selection,
    pub region: Selection,
}

impl EntryFilter {
    /// No criterion would exclude anything
    pub fn is_unset(&self) -> bool {
        self.query.trim().is_empty() && self.language.is_all() && self.region.is_all()
    }
}

fn matches_query(item: &AggregatedEntry, needle: &str) -> bool {
    let entry = &item.entry;
    contains_folded(&entry.word, needle)
        || contains_folded(&entry.meaning, needle)
        || entry
            .pronunciation
            .as_deref()
            .is_some_and(|p| contains_folded(p, needle))
        || entry
            .example
            .as_deref()
            .is_some_and(|e| contains_folded(e, needle))
        || entry.dialects().any(|d| contains_folded(d, needle))
}

fn matches_region(item: &AggregatedEntry, region: &Selection) -> bool {
    match region.as_deref() {
        None => true,
        Some(wanted) => match item.entry.region() {
            Some(own) => own == wanted,
            None => non_empty(&item.language_region) == Some(wanted),
        },
    }
}

/// Select the entries matching every criterion of `filter`.
///
/// The query (surrounding whitespace ignored) matches when any of word,
/// meaning, pronunciation, example or a non-empty dialect contains it after
/// [`fold`]ing both sides. The language selector compares the parent language
/// name exactly. The region selector compares the entry's own region, or the
/// language region when the entry has none.
///
/// The result borrows from the input and keeps its order, so it can be fed
/// back in: filtering twice with the same criteria changes nothing.
pub fn filter_entries<'a, I>(entries: I, filter: &EntryFilter) -> Vec<&'a AggregatedEntry>
where
    I: IntoIterator<Item = &'a AggregatedEntry>,
{
    if filter.is_unset() {
        return entries.into_iter().collect();
    }

    let query = filter.query.trim();
    let needle = (!query.is_empty()).then(|| fold(query));

    entries
        .into_iter()
        .filter(|item| {
            needle
                .as_deref()
                .is_none_or(|needle| matches_query(item, needle))
                && filter.language.matches(Some(item.language_name.as_str()))
                && matches_region(item, &filter.region)
        })
        .collect()
}
