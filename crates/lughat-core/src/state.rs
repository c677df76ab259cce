use serde::{Deserialize, Serialize};

use crate::grouping::GroupBy;
use crate::pagination::{PageSize, clamp_page};
use crate::search::{EntryFilter, Selection};
use crate::sort::SortKey;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    All,
    ByLanguage,
    ByRegion,
}

impl ViewMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "list" => Some(ViewMode::All),
            "by-language" | "language" => Some(ViewMode::ByLanguage),
            "by-region" | "region" => Some(ViewMode::ByRegion),
            _ => None,
        }
    }

    pub fn grouping(&self) -> Option<GroupBy> {
        match self {
            ViewMode::All => None,
            ViewMode::ByLanguage => Some(GroupBy::Language),
            ViewMode::ByRegion => Some(GroupBy::Region),
        }
    }
}

/// Everything the dictionary page needs to know to render one view.
///
/// Edits go through the `with_*` methods, each returning a new value. Any
/// edit that can change how many entries pass the filter also sends the
/// reader back to page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub query: String,
    pub language: Selection,
    pub region: Selection,
    pub sort: SortKey,
    pub page_size: PageSize,
    /// 1-indexed
    pub page: usize,
    pub mode: ViewMode,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            language: Selection::All,
            region: Selection::All,
            sort: SortKey::default(),
            page_size: PageSize::default(),
            page: 1,
            mode: ViewMode::default(),
        }
    }
}

/// One change to a [`FilterState`], as sent by the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEdit {
    Query(String),
    Language(Selection),
    Region(Selection),
    Sort(SortKey),
    PageSize(PageSize),
    Page(usize),
    Mode(ViewMode),
    Clear,
}

impl FilterState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn entry_filter(&self) -> EntryFilter {
        EntryFilter {
            query: self.query.clone(),
            language: self.language.clone(),
            region: self.region.clone(),
        }
    }

    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_language(&self, language: Selection) -> Self {
        Self {
            language,
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_region(&self, region: Selection) -> Self {
        Self {
            region,
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_page_size(&self, page_size: PageSize) -> Self {
        Self {
            page_size,
            page: 1,
            ..self.clone()
        }
    }

    /// Sorting reorders but keeps the count, so the page is kept
    pub fn with_sort(&self, sort: SortKey) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    pub fn with_mode(&self, mode: ViewMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    /// Reset query and selectors, keep sort, density and view mode
    pub fn cleared(&self) -> Self {
        Self {
            query: String::new(),
            language: Selection::All,
            region: Selection::All,
            page: 1,
            ..self.clone()
        }
    }

    pub fn apply(&self, edit: FilterEdit) -> Self {
        match edit {
            FilterEdit::Query(q) => self.with_query(q),
            FilterEdit::Language(sel) => self.with_language(sel),
            FilterEdit::Region(sel) => self.with_region(sel),
            FilterEdit::Sort(key) => self.with_sort(key),
            FilterEdit::PageSize(size) => self.with_page_size(size),
            FilterEdit::Page(page) => self.with_page(page),
            FilterEdit::Mode(mode) => self.with_mode(mode),
            FilterEdit::Clear => self.cleared(),
        }
    }

    /// Page clamped to what `filtered_count` entries allow
    pub fn clamped(&self, filtered_count: usize) -> Self {
        Self {
            page: clamp_page(self.page, filtered_count, self.page_size),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_edits_reset_page() {
        let state = FilterState::default().with_page(4);
        assert_eq!(state.page, 4);
        assert_eq!(state.with_query("salam").page, 1);
        assert_eq!(state.with_region(Selection::from_input("Sindh")).page, 1);
        assert_eq!(state.with_language(Selection::from_input("Sindhi")).page, 1);
        assert_eq!(state.with_page_size(PageSize::dictionary(96).unwrap()).page, 1);
        assert_eq!(state.apply(FilterEdit::Clear).page, 1);
    }

    #[test]
    fn test_sort_and_mode_keep_page() {
        let state = FilterState::default().with_page(3);
        assert_eq!(state.with_sort(SortKey::Region).page, 3);
        assert_eq!(state.with_mode(ViewMode::ByRegion).page, 3);
    }

    #[test]
    fn test_edits_do_not_touch_original() {
        let state = FilterState::default();
        let _ = state.with_query("x");
        assert_eq!(state.query, "");
    }

    #[test]
    fn test_clear_keeps_presentation_choices() {
        let state = FilterState::default()
            .with_sort(SortKey::Language)
            .with_mode(ViewMode::ByLanguage)
            .with_query("pani")
            .cleared();
        assert_eq!(state.query, "");
        assert_eq!(state.sort, SortKey::Language);
        assert_eq!(state.mode, ViewMode::ByLanguage);
    }

    #[test]
    fn test_clamped() {
        let state = FilterState::default().with_page(9);
        assert_eq!(state.clamped(30).page, 2);
        assert_eq!(state.clamped(0).page, 1);
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!(ViewMode::parse("by-language"), Some(ViewMode::ByLanguage));
        assert_eq!(ViewMode::parse("region"), Some(ViewMode::ByRegion));
        assert_eq!(ViewMode::parse("grid"), None);
    }
}
