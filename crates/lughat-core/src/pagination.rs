use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Page sizes offered on the all-words dictionary view
pub const DICTIONARY_PAGE_SIZES: [usize; 4] = [24, 48, 96, 192];

/// Page sizes offered on the language listing
pub const LANGUAGE_PAGE_SIZES: [usize; 4] = [12, 24, 48, 96];

/// Neighbours shown on each side of the current page
pub const DEFAULT_PAGE_RADIUS: usize = 2;

/// Items per page, restricted to one of the offered choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    fn from_choices(size: usize, choices: &[usize]) -> Option<Self> {
        if choices.contains(&size) {
            NonZeroUsize::new(size).map(PageSize)
        } else {
            None
        }
    }

    pub fn dictionary(size: usize) -> Option<Self> {
        Self::from_choices(size, &DICTIONARY_PAGE_SIZES)
    }

    pub fn language(size: usize) -> Option<Self> {
        Self::from_choices(size, &LANGUAGE_PAGE_SIZES)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(NonZeroUsize::new(DICTIONARY_PAGE_SIZES[0]).unwrap_or(NonZeroUsize::MIN))
    }
}

/// `ceil(count / size)`; zero items means zero pages
pub fn total_pages(count: usize, size: PageSize) -> usize {
    count.div_ceil(size.get())
}

/// Clamp a 1-indexed page number into `[1, max(1, total_pages)]`
pub fn clamp_page(page: usize, count: usize, size: PageSize) -> usize {
    page.clamp(1, total_pages(count, size).max(1))
}

/// One page of a sorted list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed page that was requested
    pub number: usize,
    pub size: PageSize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// 1-indexed inclusive range of items on this page, as shown in
    /// "Showing X to Y of Z"; `None` when the page is empty
    pub fn showing(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let start = (self.number - 1) * self.size.get();
        Some((start + 1, start + self.items.len()))
    }

    pub fn previous(&self) -> Option<usize> {
        (self.number > 1 && self.total_pages > 0).then(|| (self.number - 1).min(self.total_pages))
    }

    pub fn next(&self) -> Option<usize> {
        (self.number < self.total_pages).then(|| self.number + 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Slice `[(page-1)*size, page*size)` out of `items`.
///
/// Out-of-range pages (including page 0) give an empty page rather than an
/// error.
pub fn paginate<T: Clone>(items: &[T], page: usize, size: PageSize) -> Page<T> {
    let total_items = items.len();
    let slice = match page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(size.get()).min(total_items);
            let end = start.saturating_add(size.get()).min(total_items);
            &items[start..end]
        }
        None => &[],
    };

    Page {
        items: slice.to_vec(),
        number: page,
        size,
        total_items,
        total_pages: total_pages(total_items, size),
    }
}

/// Entry of the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(n) => write!(f, "{n}"),
            PageMarker::Ellipsis => f.write_str("..."),
        }
    }
}

/// Page numbers to display around `current`.
///
/// Always shows the first and last page plus every page within `radius` of
/// `current`; an ellipsis stands in for each skipped run.
pub fn visible_pages(current: usize, total: usize, radius: usize) -> Vec<PageMarker> {
    match total {
        0 => return Vec::new(),
        1 => return vec![PageMarker::Page(1)],
        _ => {}
    }

    let low = current.saturating_sub(radius).max(2);
    let high = current.saturating_add(radius).min(total - 1);

    let mut markers = vec![PageMarker::Page(1)];
    if current.saturating_sub(radius) > 2 {
        markers.push(PageMarker::Ellipsis);
    }
    markers.extend((low..=high).map(PageMarker::Page));
    if current.saturating_add(radius) < total - 1 {
        markers.push(PageMarker::Ellipsis);
    }
    markers.push(PageMarker::Page(total));
    markers
}
