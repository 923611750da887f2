//! Offset pagination shared by every list view.

use serde::{Deserialize, Serialize};

/// Maximum items per page across all views.
const MAX_PER_PAGE: u32 = 200;

/// Default items per page when a route does not pick its own size.
const DEFAULT_PER_PAGE: u32 = 50;

/// Pagination parameters
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (max 200)
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination with validation.
    ///
    /// - Page is clamped to minimum of 1
    /// - Per page is clamped to 1..=200
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> u64 {
        ((self.page - 1) * self.per_page) as u64
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> u32 {
        self.per_page
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Paginated result wrapper
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    /// Current page number
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl<T> Paginated<T> {
    /// An empty result set for the requested page. Used when a list query
    /// fails: the page still renders, with "no entries found" messaging.
    pub fn empty(page: Pagination) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: page.page,
            per_page: page.per_page,
        }
    }

    /// Calculate total number of pages.
    pub fn total_pages(&self) -> u32 {
        if self.total <= 0 {
            1
        } else {
            ((self.total as u32 + self.per_page - 1) / self.per_page).max(1)
        }
    }

    /// Check if there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Check if there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Window of page numbers around the current page, for numbered
    /// pagination controls. `radius` pages either side, clamped to range.
    pub fn page_window(&self, radius: u32) -> std::ops::RangeInclusive<u32> {
        let start = self.page.saturating_sub(radius).max(1);
        let end = (self.page + radius).min(self.total_pages());
        start..=end
    }
}

/// Query parameters for paginated routes. Page size is fixed per view, so
/// only the page number travels in the URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
}

impl PaginationParams {
    /// Resolve against a view's page size.
    pub fn with_per_page(&self, per_page: u32) -> Pagination {
        Pagination::new(self.page.unwrap_or(1), per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_calculation() {
        let p = Pagination::new(1, 10);
        assert_eq!(p.offset(), 0);

        let p = Pagination::new(2, 10);
        assert_eq!(p.offset(), 10);

        let p = Pagination::new(3, 25);
        assert_eq!(p.offset(), 50);
    }

    #[test]
    fn clamps_page() {
        let p = Pagination::new(0, 10);
        assert_eq!(p.page, 1);
    }

    #[test]
    fn clamps_per_page() {
        let p = Pagination::new(1, 0);
        assert_eq!(p.per_page, 1);

        let p = Pagination::new(1, 999);
        assert_eq!(p.per_page, 200);
    }

    #[test]
    fn total_pages() {
        let paginated: Paginated<()> = Paginated {
            items: vec![],
            total: 0,
            page: 1,
            per_page: 10,
        };
        assert_eq!(paginated.total_pages(), 1);

        let paginated: Paginated<()> = Paginated {
            items: vec![],
            total: 25,
            page: 1,
            per_page: 10,
        };
        assert_eq!(paginated.total_pages(), 3);

        let paginated: Paginated<()> = Paginated {
            items: vec![],
            total: 100,
            page: 1,
            per_page: 10,
        };
        assert_eq!(paginated.total_pages(), 10);
    }

    #[test]
    fn has_next_prev() {
        let paginated: Paginated<()> = Paginated {
            items: vec![],
            total: 30,
            page: 1,
            per_page: 10,
        };
        assert!(paginated.has_next());
        assert!(!paginated.has_prev());

        let paginated: Paginated<()> = Paginated {
            items: vec![],
            total: 30,
            page: 3,
            per_page: 10,
        };
        assert!(!paginated.has_next());
        assert!(paginated.has_prev());
    }

    #[test]
    fn page_window_clamps_to_range() {
        let paginated: Paginated<()> = Paginated {
            items: vec![],
            total: 1000,
            page: 1,
            per_page: 10,
        };
        assert_eq!(paginated.page_window(3), 1..=4);

        let paginated: Paginated<()> = Paginated {
            items: vec![],
            total: 1000,
            page: 50,
            per_page: 10,
        };
        assert_eq!(paginated.page_window(3), 47..=53);

        let paginated: Paginated<()> = Paginated {
            items: vec![],
            total: 1000,
            page: 100,
            per_page: 10,
        };
        assert_eq!(paginated.page_window(3), 97..=100);
    }

    #[test]
    fn params_resolve_with_view_size() {
        let params = PaginationParams { page: Some(4) };
        let p = params.with_per_page(100);
        assert_eq!(p.page, 4);
        assert_eq!(p.per_page, 100);
        assert_eq!(p.offset(), 300);

        let p = PaginationParams::default().with_per_page(50);
        assert_eq!(p.page, 1);
    }

    #[test]
    fn empty_keeps_requested_page() {
        let p: Paginated<()> = Paginated::empty(Pagination::new(7, 50));
        assert!(p.items.is_empty());
        assert_eq!(p.total, 0);
        assert_eq!(p.page, 7);
    }
}
