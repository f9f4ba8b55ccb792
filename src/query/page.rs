//! Page/page_size pagination

/// Default page number
pub const DEFAULT_PAGE: i64 = 1;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Requested page of a listing
///
/// Neither field is validated: `page_size` has no upper bound and a
/// non-positive `page` yields a negative offset that the database rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub page_size: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Page {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Rows to skip
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}
