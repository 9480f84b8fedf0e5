//! Paginated result envelope

use serde::Serialize;

/// One page of results plus the totals needed to navigate the rest.
///
/// Serialized as `{content, page, size, totalElements, totalPages}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in result order
    pub content: Vec<T>,

    /// Zero-based page number that was requested
    pub page: usize,

    /// Requested page size
    pub size: usize,

    /// Number of matching items before pagination
    pub total_elements: usize,

    /// `ceil(total_elements / size)`
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: usize, size: usize, total_elements: usize) -> Self {
        let divisor = size.max(1);
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages: total_elements.div_ceil(divisor),
        }
    }

    /// Cut one page out of an already ordered result set
    pub fn slice(items: Vec<T>, page: usize, size: usize) -> Self {
        let total = items.len();
        let start = page.saturating_mul(size);
        let content = if start >= total {
            Vec::new()
        } else {
            items.into_iter().skip(start).take(size).collect()
        };
        Self::new(content, page, size, total)
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }
}
