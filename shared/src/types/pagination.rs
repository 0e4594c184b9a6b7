//! Pagination types for page-by-page list fetching
//!
//! The backend does not return totals; clients detect the end of a list with
//! a short-page heuristic (a page shorter than requested is the last one).

use serde::{Deserialize, Serialize};

/// Request parameters for one page of a list
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_per_page")]
    pub items_per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            items_per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Create a new page request with sanitized values
    pub fn new(page: u32, items_per_page: u32) -> Self {
        Self {
            page: page.max(1),
            items_per_page: items_per_page.clamp(MIN_PER_PAGE, MAX_PER_PAGE),
        }
    }

    /// First page with the given size
    pub fn first(items_per_page: u32) -> Self {
        Self::new(1, items_per_page)
    }

    /// The request for the page after this one
    pub fn next(&self) -> Self {
        Self {
            page: self.page + 1,
            items_per_page: self.items_per_page,
        }
    }

    /// Check if this is the first page
    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }

    /// Short-page heuristic: a page with fewer items than requested is the
    /// last one, so there are more pages exactly when the page came back full.
    pub fn indicates_more(&self, returned: usize) -> bool {
        returned as u32 >= self.items_per_page
    }
}

// Constants
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 10;
const MIN_PER_PAGE: u32 = 1;
const MAX_PER_PAGE: u32 = 100;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_values() {
        let request = PageRequest::new(0, 500);
        assert_eq!(request.page, 1);
        assert_eq!(request.items_per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_next_page() {
        let request = PageRequest::first(10);
        assert!(request.is_first_page());
        let next = request.next();
        assert_eq!(next.page, 2);
        assert_eq!(next.items_per_page, 10);
    }

    #[test]
    fn test_short_page_heuristic() {
        let request = PageRequest::first(10);
        assert!(request.indicates_more(10));
        assert!(request.indicates_more(11));
        assert!(!request.indicates_more(9));
        assert!(!request.indicates_more(0));
    }
}
