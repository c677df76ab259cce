use std::path::PathBuf;

use lughat_types::{Caller, ImportStatus, Language, Notice};

use crate::aggregate::AggregatedEntry;
use crate::browse::{LanguageListing, LanguageQuery};
use crate::catalog::Snapshot;
use crate::grouping::GroupBy;
use crate::pagination::PageMarker;
use crate::state::{FilterEdit, FilterState};
use crate::stats::{CatalogStats, DictionaryStats};
use crate::view::{DictionaryView, ViewOutput};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A complete new copy of the language collection
    SnapshotReceived(Snapshot),
    StoreFailed(String),
    Filter(FilterEdit),
    /// Read a CSV file into the dictionary of the language being edited
    ImportCsv {
        language_id: Option<String>,
        path: PathBuf,
    },
    /// Start editing a language, seeding the import state from its dictionary
    EditLanguage(String),
    CreateLanguage {
        caller: Caller,
        draft: Box<Language>,
    },
    UpdateLanguage {
        caller: Caller,
        id: String,
        language: Box<Language>,
    },
    DeleteLanguage {
        caller: Caller,
        id: String,
    },
    /// Save the imported entries into the language being edited
    SubmitEdit(Caller),
    BrowseLanguages(LanguageQuery),
    RequestStats,
    ShowView(ViewModel),
    ShowLanguages(LanguageListModel),
    ShowStats {
        dictionary: DictionaryStats,
        catalog: CatalogStats,
    },
    ImportStatusChanged(ImportStatus),
    Notify(Notice),
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSummary {
    pub id: String,
    pub name: String,
    pub iso_code: Option<String>,
    pub region: Option<String>,
    pub family: Option<String>,
    pub status: Option<String>,
    pub speakers: Option<u64>,
    pub words: usize,
}

impl From<&Language> for LanguageSummary {
    fn from(lang: &Language) -> Self {
        Self {
            id: lang.id.clone(),
            name: lang.name.clone(),
            iso_code: lang.iso_code.clone(),
            region: lang.region.clone(),
            family: lang.family.clone(),
            status: lang.status.clone(),
            speakers: lang.speakers,
            words: lang.dictionary.iter().filter(|e| e.is_valid()).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageListModel {
    pub filtered_count: usize,
    pub page: usize,
    pub total_pages: usize,
    pub markers: Vec<PageMarker>,
    pub languages: Vec<LanguageSummary>,
}

impl From<&LanguageListing<'_>> for LanguageListModel {
    fn from(listing: &LanguageListing<'_>) -> Self {
        Self {
            filtered_count: listing.filtered_count,
            page: listing.page.number,
            total_pages: listing.page.total_pages,
            markers: listing.markers.clone(),
            languages: listing.page.items.iter().map(|l| LanguageSummary::from(*l)).collect(),
        }
    }
}

/// One dictionary entry as the presentation layer shows it
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEntry {
    pub word: String,
    pub meaning: String,
    pub pronunciation: Option<String>,
    pub example: Option<String>,
    pub dialects: Vec<String>,
    pub language_id: String,
    pub language_name: String,
    /// The entry's own region, falling back to its language's
    pub region: Option<String>,
}

impl From<&AggregatedEntry> for DisplayEntry {
    fn from(item: &AggregatedEntry) -> Self {
        Self {
            word: item.entry.word.clone(),
            meaning: item.entry.meaning.clone(),
            pronunciation: item.entry.pronunciation.clone(),
            example: item.entry.example.clone(),
            dialects: item.entry.dialects().map(str::to_string).collect(),
            language_id: item.language_id.clone(),
            language_name: item.language_name.clone(),
            region: item.effective_region().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayGroup {
    pub label: String,
    pub count: usize,
    pub entries: Vec<DisplayEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayView {
    List {
        entries: Vec<DisplayEntry>,
        page: usize,
        total_pages: usize,
        /// 1-indexed inclusive range of the shown entries
        showing: Option<(usize, usize)>,
        markers: Vec<PageMarker>,
    },
    Grouped {
        by: GroupBy,
        groups: Vec<DisplayGroup>,
    },
}

/// Owned rendering of one pipeline run, safe to send across tasks
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub revision: u64,
    pub state: FilterState,
    pub filtered_count: usize,
    pub stats: DictionaryStats,
    pub view: DisplayView,
}

impl ViewModel {
    pub fn new(revision: u64, stats: DictionaryStats, output: &ViewOutput<'_>) -> Self {
        let view = match &output.view {
            DictionaryView::List { page, markers } => DisplayView::List {
                entries: page.items.iter().map(|e| DisplayEntry::from(*e)).collect(),
                page: page.number,
                total_pages: page.total_pages,
                showing: page.showing(),
                markers: markers.clone(),
            },
            DictionaryView::Grouped { by, groups } => DisplayView::Grouped {
                by: *by,
                groups: groups
                    .iter()
                    .map(|g| DisplayGroup {
                        label: g.label().to_string(),
                        count: g.count,
                        entries: g.entries.iter().map(|e| DisplayEntry::from(*e)).collect(),
                    })
                    .collect(),
            },
        };

        Self {
            revision,
            state: output.state.clone(),
            filtered_count: output.filtered_count,
            stats,
            view,
        }
    }

    pub fn entries(&self) -> Vec<&DisplayEntry> {
        match &self.view {
            DisplayView::List { entries, .. } => entries.iter().collect(),
            DisplayView::Grouped { groups, .. } => groups.iter().flat_map(|g| g.entries.iter()).collect(),
        }
    }
}
