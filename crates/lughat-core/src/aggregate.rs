use lughat_types::{DictionaryEntry, Language, non_empty};

/// A dictionary entry together with the parent language fields needed for
/// cross-language search and display
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedEntry {
    pub entry: DictionaryEntry,
    pub language_id: String,
    pub language_name: String,
    pub language_region: Option<String>,
    pub language_family: Option<String>,
    pub language_speakers: Option<u64>,
    /// Index of the entry inside its language's dictionary
    pub position: usize,
}

/// Stable identity of an aggregated entry for rendering lists that may
/// contain the same word twice
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey<'a> {
    pub language_id: &'a str,
    pub word: &'a str,
    pub position: usize,
}

impl AggregatedEntry {
    pub fn key(&self) -> EntryKey<'_> {
        EntryKey {
            language_id: &self.language_id,
            word: &self.entry.word,
            position: self.position,
        }
    }

    /// Entry region override, falling back to the language region
    pub fn effective_region(&self) -> Option<&str> {
        self.entry
            .region()
            .or_else(|| non_empty(&self.language_region))
    }
}

/// Flatten every language dictionary into one list.
///
/// Language order and per-language entry order are preserved. Languages with
/// an empty dictionary contribute nothing. Entries are never rejected here: a
/// malformed entry simply carries empty fields.
pub fn aggregate(languages: &[Language]) -> Vec<AggregatedEntry> {
    let total: usize = languages.iter().map(|l| l.dictionary.len()).sum();
    let mut entries = Vec::with_capacity(total);

    for lang in languages {
        for (position, entry) in lang.dictionary.iter().enumerate() {
            entries.push(AggregatedEntry {
                entry: entry.clone(),
                language_id: lang.id.clone(),
                language_name: lang.name.clone(),
                language_region: lang.region.clone(),
                language_family: lang.family.clone(),
                language_speakers: lang.speakers,
                position,
            });
        }
    }

    tracing::debug!(
        "Aggregated {} entries from {} languages",
        entries.len(),
        languages.len()
    );
    entries
}
