use std::collections::BTreeSet;
use std::sync::Arc;

use lughat_types::Language;

use crate::aggregate::{AggregatedEntry, aggregate};
use crate::state::FilterState;
use crate::stats::{DictionaryStats, dictionary_stats};
use crate::view::{ViewOutput, build_view};

/// Full point-in-time copy of the language collection
pub type Snapshot = Arc<Vec<Language>>;

/// Choices for the language and region selectors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub languages: Vec<String>,
    pub regions: Vec<String>,
}

/// Current snapshot plus everything derived from it.
///
/// Snapshots always replace the previous one wholesale; derived data is
/// recomputed on each replacement and never patched incrementally.
#[derive(Debug, Default)]
pub struct Catalog {
    languages: Snapshot,
    entries: Vec<AggregatedEntry>,
    revision: u64,
}

impl Catalog {
    pub fn new(languages: Snapshot) -> Self {
        let entries = aggregate(&languages);
        Self {
            languages,
            entries,
            revision: 1,
        }
    }

    /// Swap in a new snapshot, returns the new revision
    pub fn replace(&mut self, languages: Snapshot) -> u64 {
        self.entries = aggregate(&languages);
        self.languages = languages;
        self.revision += 1;
        tracing::info!(
            "Catalog revision {}: {} languages, {} words",
            self.revision,
            self.languages.len(),
            self.entries.len()
        );
        self.revision
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.languages)
    }

    pub fn entries(&self) -> &[AggregatedEntry] {
        &self.entries
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn find(&self, id: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.id == id)
    }

    pub fn view(&self, state: &FilterState, radius: usize) -> ViewOutput<'_> {
        build_view(&self.entries, state, radius)
    }

    pub fn stats(&self) -> DictionaryStats {
        dictionary_stats(&self.languages)
    }

    /// Sorted unique language names and regions
    pub fn filter_options(&self) -> FilterOptions {
        let languages: BTreeSet<&str> = self
            .languages
            .iter()
            .map(|l| l.name.as_str())
            .filter(|n| !n.trim().is_empty())
            .collect();
        let regions: BTreeSet<&str> = self.languages.iter().filter_map(Language::region_name).collect();

        FilterOptions {
            languages: languages.into_iter().map(str::to_string).collect(),
            regions: regions.into_iter().map(str::to_string).collect(),
        }
    }
}
