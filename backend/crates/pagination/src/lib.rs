//! Page-number pagination primitives shared by storefront list endpoints.
//!
//! Query parameters are clamped rather than rejected: a page below one is
//! treated as the first page and `per_page` is bounded to keep result sets
//! small. List endpoints respond with a [`Page`] envelope carrying the
//! `{total, pages, current_page}` metadata clients use to render pagers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Default number of items per page when the caller does not specify one.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Upper bound applied to caller-supplied `per_page` values.
pub const MAX_PER_PAGE: i64 = 100;

/// Validated page/per-page pair for offset pagination.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= per_page <= MAX_PER_PAGE`
///
/// # Examples
/// ```
/// use pagination::PageParams;
///
/// let params = PageParams::clamped(Some(0), Some(500));
/// assert_eq!(params.page(), 1);
/// assert_eq!(params.per_page(), pagination::MAX_PER_PAGE);
/// assert_eq!(params.offset(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    page: i64,
    per_page: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageParams {
    /// Build parameters from raw query values, clamping out-of-range input.
    pub fn clamped(page: Option<i64>, per_page: Option<i64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let per_page = per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        Self { page, per_page }
    }

    /// One-based page number.
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Number of items per page.
    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Row offset for the underlying query.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    /// Row limit for the underlying query.
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// One page of results plus the metadata needed to render a pager.
///
/// `pages` is the total page count for the query (`ceil(total / per_page)`),
/// so an empty result set reports zero pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    /// Items on the current page.
    pub items: Vec<T>,
    /// Total number of matching items across all pages.
    pub total: i64,
    /// Total number of pages.
    pub pages: i64,
    /// One-based index of this page.
    pub current_page: i64,
}

impl<T> Page<T> {
    /// Assemble a page envelope from query results and the request params.
    pub fn new(items: Vec<T>, total: i64, params: &PageParams) -> Self {
        // Ceiling division; total >= 0 and per_page >= 1 are guaranteed by
        // the queries and PageParams::clamped respectively.
        let per_page = params.per_page();
        Self {
            items,
            total,
            pages: (total + per_page - 1) / per_page,
            current_page: params.page(),
        }
    }

    /// Transform the items while keeping the pagination metadata intact.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            pages: self.pages,
            current_page: self.current_page,
        }
    }
}
