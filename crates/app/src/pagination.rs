//! Pagination
//!
//! Lists are 1-indexed and page sizes are clamped before they reach SQL, so `OFFSET` and
//! `LIMIT` are always bounded.

use smallvec::SmallVec;

/// Page size used when the caller supplies none (or nonsense).
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound for page sizes and search limits.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Number of page links shown either side of the current page.
const WINDOW_RADIUS: u32 = 2;

/// A clamped page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a request from raw query values.
    #[must_use]
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page
            .filter(|page| *page >= 1)
            .map_or(1, |page| u32::try_from(page).unwrap_or(u32::MAX));

        Self {
            page,
            page_size: clamp_size(page_size),
        }
    }

    pub fn page(self) -> u32 {
        self.page
    }

    pub fn page_size(self) -> u32 {
        self.page_size
    }

    /// `LIMIT` bind value.
    pub fn limit(self) -> i64 {
        i64::from(self.page_size)
    }

    /// `OFFSET` bind value.
    pub fn offset(self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// A typeahead result cap, clamped to `1..=MAX_PAGE_SIZE` on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimit(u32);

impl SearchLimit {
    /// Build a limit from a raw query value; missing or non-positive values use the default.
    #[must_use]
    pub fn new(limit: Option<i64>) -> Self {
        Self(clamp_size(limit))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// `LIMIT` bind value.
    pub fn limit(self) -> i64 {
        i64::from(self.0)
    }
}

impl Default for SearchLimit {
    fn default() -> Self {
        Self::new(None)
    }
}

fn clamp_size(size: Option<i64>) -> u32 {
    match size {
        Some(size) if size >= 1 => u32::try_from(size.min(i64::from(MAX_PAGE_SIZE)))
            .unwrap_or(MAX_PAGE_SIZE),
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// One page of results plus the unpaginated row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub(crate) fn new(items: Vec<T>, total: i64) -> Self {
        Self {
            items,
            total: u64::try_from(total).unwrap_or_default(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Navigation data for a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub pages: SmallVec<[u64; 5]>,
}

impl Pagination {
    #[must_use]
    pub fn calculate(request: PageRequest, total: u64) -> Self {
        let page_size = u64::from(request.page_size());
        let page = u64::from(request.page());

        let total_pages = total.div_ceil(page_size);

        let first = page.saturating_sub(u64::from(WINDOW_RADIUS)).max(1);
        let last = total_pages.min(page + u64::from(WINDOW_RADIUS));

        Self {
            page: request.page(),
            page_size: request.page_size(),
            total_pages,
            has_previous: page > 1,
            has_next: page < total_pages,
            pages: (first..=last).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_and_invalid_values() {
        let request = PageRequest::new(None, None);

        assert_eq!(request.page(), 1);
        assert_eq!(request.page_size(), DEFAULT_PAGE_SIZE);

        let request = PageRequest::new(Some(0), Some(-5));

        assert_eq!(request.page(), 1);
        assert_eq!(request.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn oversized_page_size_is_clamped() {
        let request = PageRequest::new(Some(3), Some(10_000));

        assert_eq!(request.page_size(), MAX_PAGE_SIZE);
        assert_eq!(request.limit(), 100);
        assert_eq!(request.offset(), 200);
    }

    #[test]
    fn search_limit_is_clamped() {
        assert_eq!(SearchLimit::new(Some(10_000)).limit(), 100);
        assert_eq!(SearchLimit::new(Some(0)).limit(), 10);
        assert_eq!(SearchLimit::new(Some(-1)).limit(), 10);
        assert_eq!(SearchLimit::new(Some(5)).get(), 5);
        assert_eq!(SearchLimit::default().get(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn first_page_has_no_previous() {
        let pagination = Pagination::calculate(PageRequest::new(Some(1), Some(10)), 95);

        assert_eq!(pagination.total_pages, 10);
        assert!(!pagination.has_previous);
        assert!(pagination.has_next);
        assert_eq!(pagination.pages, SmallVec::<[u64; 5]>::from_slice(&[1, 2, 3]));
    }

    #[test]
    fn window_is_centred_and_bounded() {
        let pagination = Pagination::calculate(PageRequest::new(Some(5), Some(10)), 95);

        assert_eq!(pagination.pages, SmallVec::<[u64; 5]>::from_slice(&[3, 4, 5, 6, 7]));

        let pagination = Pagination::calculate(PageRequest::new(Some(10), Some(10)), 95);

        assert!(pagination.has_previous);
        assert!(!pagination.has_next);
        assert_eq!(pagination.pages, SmallVec::<[u64; 5]>::from_slice(&[8, 9, 10]));
    }

    #[test]
    fn empty_listing_has_no_pages() {
        let pagination = Pagination::calculate(PageRequest::default(), 0);

        assert_eq!(pagination.total_pages, 0);
        assert!(!pagination.has_next);
        assert!(pagination.pages.is_empty());
    }
}
