//! The language listing: search, filter and sort whole language records
//! rather than their dictionary entries.

use std::cmp::Reverse;

use lughat_types::{Language, non_empty};
use serde::{Deserialize, Serialize};

use crate::pagination::{Page, PageMarker, PageSize, clamp_page, paginate, visible_pages};
use crate::preprocess::{contains_folded, fold};
use crate::search::Selection;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageFilter {
    pub query: String,
    pub region: Selection,
    pub family: Selection,
    pub status: Selection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageSortKey {
    #[default]
    Name,
    /// Largest population first, unknown counted as zero
    Speakers,
    Region,
    Family,
    /// Newest first
    Created,
}

impl LanguageSortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Some(LanguageSortKey::Name),
            "speakers" => Some(LanguageSortKey::Speakers),
            "region" => Some(LanguageSortKey::Region),
            "family" => Some(LanguageSortKey::Family),
            "created" => Some(LanguageSortKey::Created),
            _ => None,
        }
    }
}

fn text_matches(lang: &Language, needle: &str) -> bool {
    contains_folded(&lang.name, needle)
        || [&lang.description, &lang.location, &lang.family, &lang.iso_code]
            .into_iter()
            .any(|field| non_empty(field).is_some_and(|v| contains_folded(v, needle)))
}

/// Public listing filter: text over name, description, location, family and
/// ISO code, plus exact region, family and status selectors
pub fn filter_languages<'a>(languages: &'a [Language], filter: &LanguageFilter) -> Vec<&'a Language> {
    let query = filter.query.trim();
    let needle = (!query.is_empty()).then(|| fold(query));

    languages
        .iter()
        .filter(|lang| {
            needle.as_deref().is_none_or(|n| text_matches(lang, n))
                && filter.region.matches(non_empty(&lang.region))
                && filter.family.matches(non_empty(&lang.family))
                && filter.status.matches(non_empty(&lang.status))
        })
        .collect()
}

/// Admin table search over name, ISO code and region
pub fn admin_search<'a>(languages: &'a [Language], query: &str) -> Vec<&'a Language> {
    let query = query.trim();
    if query.is_empty() {
        return languages.iter().collect();
    }
    let needle = fold(query);

    languages
        .iter()
        .filter(|lang| {
            contains_folded(&lang.name, &needle)
                || [&lang.iso_code, &lang.region]
                    .into_iter()
                    .any(|field| non_empty(field).is_some_and(|v| contains_folded(v, &needle)))
        })
        .collect()
}

/// Stable sort; text keys compare folded with missing values first
pub fn sort_languages<'a>(languages: &[&'a Language], key: LanguageSortKey) -> Vec<&'a Language> {
    let mut sorted = languages.to_vec();
    match key {
        LanguageSortKey::Name => sorted.sort_by_cached_key(|l| fold(&l.name)),
        LanguageSortKey::Region => sorted.sort_by_cached_key(|l| fold(non_empty(&l.region).unwrap_or(""))),
        LanguageSortKey::Family => sorted.sort_by_cached_key(|l| fold(non_empty(&l.family).unwrap_or(""))),
        LanguageSortKey::Speakers => sorted.sort_by_key(|l| Reverse(l.speakers.unwrap_or(0))),
        LanguageSortKey::Created => sorted.sort_by_key(|l| Reverse(l.created_at)),
    }
    sorted
}

/// One page of the language listing
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageListing<'a> {
    pub filtered_count: usize,
    pub page: Page<&'a Language>,
    pub markers: Vec<PageMarker>,
}

fn list_languages<'a>(
    found: Vec<&'a Language>,
    sort: LanguageSortKey,
    page: usize,
    size: PageSize,
    radius: usize,
) -> LanguageListing<'a> {
    let sorted = sort_languages(&found, sort);
    let page = paginate(&sorted, clamp_page(page, sorted.len(), size), size);
    let markers = visible_pages(page.number, page.total_pages, radius);

    LanguageListing {
        filtered_count: found.len(),
        page,
        markers,
    }
}

pub fn browse_languages<'a>(
    languages: &'a [Language],
    filter: &LanguageFilter,
    sort: LanguageSortKey,
    page: usize,
    size: PageSize,
    radius: usize,
) -> LanguageListing<'a> {
    list_languages(filter_languages(languages, filter), sort, page, size, radius)
}

/// Request for one page of the language listing
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageQuery {
    pub filter: LanguageFilter,
    /// Admin table search; replaces `filter` when set
    pub admin_query: Option<String>,
    pub sort: LanguageSortKey,
    pub page: usize,
    pub page_size: PageSize,
}

impl LanguageQuery {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            filter: LanguageFilter::default(),
            admin_query: None,
            sort: LanguageSortKey::default(),
            page: 1,
            page_size,
        }
    }

    pub fn run<'a>(&self, languages: &'a [Language], radius: usize) -> LanguageListing<'a> {
        let found = match &self.admin_query {
            Some(query) => admin_search(languages, query),
            None => filter_languages(languages, &self.filter),
        };
        list_languages(found, self.sort, self.page, self.page_size, radius)
    }
}
