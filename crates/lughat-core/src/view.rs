use crate::aggregate::AggregatedEntry;
use crate::grouping::{EntryGroup, GroupBy, group_entries};
use crate::pagination::{Page, PageMarker, paginate, visible_pages};
use crate::search::filter_entries;
use crate::sort::sort_entries;
use crate::state::FilterState;

/// What the dictionary page shows for one [`FilterState`]
#[derive(Debug, Clone, PartialEq)]
pub enum DictionaryView<'a> {
    List {
        page: Page<&'a AggregatedEntry>,
        markers: Vec<PageMarker>,
    },
    Grouped {
        by: GroupBy,
        groups: Vec<EntryGroup<'a>>,
    },
}

impl DictionaryView<'_> {
    /// Entries actually shown
    pub fn shown(&self) -> usize {
        match self {
            DictionaryView::List { page, .. } => page.items.len(),
            DictionaryView::Grouped { groups, .. } => groups.iter().map(|g| g.count).sum(),
        }
    }
}

/// Result of running the whole pipeline once
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOutput<'a> {
    /// The state after page clamping
    pub state: FilterState,
    pub filtered_count: usize,
    pub view: DictionaryView<'a>,
}

/// Filter, then either sort and paginate or group.
///
/// Grouped views consume the filtered entries directly and ignore sort and
/// page. The list view clamps the requested page to the filtered count
/// before slicing; the clamped state is handed back so the caller can store
/// it.
pub fn build_view<'a>(
    entries: &'a [AggregatedEntry],
    state: &FilterState,
    radius: usize,
) -> ViewOutput<'a> {
    let filtered = filter_entries(entries, &state.entry_filter());
    let filtered_count = filtered.len();
    let state = state.clamped(filtered_count);

    let view = match state.mode.grouping() {
        Some(by) => DictionaryView::Grouped {
            by,
            groups: group_entries(&filtered, by),
        },
        None => {
            let sorted = sort_entries(&filtered, state.sort);
            let page = paginate(&sorted, state.page, state.page_size);
            let markers = visible_pages(page.number, page.total_pages, radius);
            DictionaryView::List { page, markers }
        }
    };

    tracing::debug!(
        "View built: {} of {} entries pass the filter, mode {:?}",
        filtered_count,
        entries.len(),
        state.mode
    );

    ViewOutput {
        state,
        filtered_count,
        view,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::aggregate::fixtures::{catalog, language};
    use crate::pagination::PageSize;
    use crate::search::Selection;
    use crate::state::ViewMode;

    #[test]
    fn test_list_view_sorts_and_pages() {
        let entries = aggregate(&catalog());
        let out = build_view(&entries, &FilterState::default(), 2);
        assert_eq!(out.filtered_count, 5);

        let DictionaryView::List { page, markers } = out.view else {
            panic!("expected list view");
        };
        let words: Vec<_> = page.items.iter().map(|e| e.entry.word.as_str()).collect();
        assert_eq!(words, vec!["Adab", "Mehrbani", "Pani", "roti", "Salam"]);
        assert_eq!(markers, vec![PageMarker::Page(1)]);
    }

    #[test]
    fn test_page_is_clamped_after_narrowing() {
        let words: Vec<(String, String)> =
            (0..60).map(|i| (format!("w{i:02}"), "m".to_string())).collect();
        let pairs: Vec<(&str, &str)> = words.iter().map(|(w, m)| (w.as_str(), m.as_str())).collect();
        let entries = aggregate(&[language("x", "X", "Sindh", &pairs)]);

        let state = FilterState::new(PageSize::dictionary(24).unwrap()).with_page(3);
        let out = build_view(&entries, &state, 2);
        assert_eq!(out.state.page, 3);
        assert_eq!(out.view.shown(), 12);

        // the page edit happened without a filter edit, so it must be clamped
        let out = build_view(&entries, &state.with_page(7), 2);
        assert_eq!(out.state.page, 3);
    }

    #[test]
    fn test_grouped_view_uses_filtered_entries() {
        let entries = aggregate(&catalog());
        let state = FilterState::default()
            .with_region(Selection::from_input("Punjab"))
            .with_mode(ViewMode::ByLanguage);
        let out = build_view(&entries, &state, 2);

        let DictionaryView::Grouped { by, groups } = out.view else {
            panic!("expected grouped view");
        };
        assert_eq!(by, GroupBy::Language);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].count, 2);
    }

    #[test]
    fn test_empty_catalog() {
        let out = build_view(&[], &FilterState::default(), 2);
        assert_eq!(out.filtered_count, 0);
        let DictionaryView::List { page, markers } = out.view else {
            panic!("expected list view");
        };
        assert_eq!(page.total_pages, 0);
        assert!(markers.is_empty());
    }
}
