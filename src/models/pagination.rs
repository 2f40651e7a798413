//! Page envelope shared by every list endpoint

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{author::AuthorWithCount, book::BookWithAuthor};

/// Resolved page position of a list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: i64,
    /// Rows per page
    pub limit: i64,
}

impl PageRequest {
    /// Fill in defaults for parameters the caller left out.
    /// Bounds are checked at the HTTP boundary, so both values are ≥ 1 here.
    pub fn new(page: Option<i64>, limit: Option<i64>, default_limit: i64) -> Self {
        Self {
            page: page.unwrap_or(1),
            limit: limit.unwrap_or(default_limit),
        }
    }

    /// Rows skipped before this page starts
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Paginated response envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[aliases(AuthorPage = Page<AuthorWithCount>, BookPage = Page<BookWithAuthor>)]
pub struct Page<T> {
    /// Rows of the requested page
    pub result: Vec<T>,
    /// Number of pages; 0 when nothing matches
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    /// Rows matching the filter across all pages
    pub count: i64,
}

impl<T> Page<T> {
    pub fn new(result: Vec<T>, count: i64, request: PageRequest) -> Self {
        let total_pages = total_pages(count, request.limit);
        Self {
            result,
            total_pages,
            has_next_page: request.page < total_pages,
            has_prev_page: request.page > 1,
            count,
        }
    }
}

/// `ceil(count / limit)`; an empty match set has zero pages.
pub fn total_pages(count: i64, limit: i64) -> i64 {
    if count <= 0 || limit <= 0 {
        return 0;
    }
    count / limit + i64::from(count % limit != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::author::AuthorWithCount;

    fn page(page: i64, limit: i64, count: i64) -> Page<AuthorWithCount> {
        Page::new(Vec::new(), count, PageRequest { page, limit })
    }

    #[test]
    fn defaults_apply_only_to_missing_values() {
        assert_eq!(
            PageRequest::new(None, None, 50),
            PageRequest { page: 1, limit: 50 }
        );
        assert_eq!(
            PageRequest::new(Some(3), Some(10), 50),
            PageRequest { page: 3, limit: 10 }
        );
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(101, 50), 3);
    }

    #[test]
    fn navigation_flags_follow_page_position() {
        let first = page(1, 2, 5);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next_page);
        assert!(!first.has_prev_page);

        let middle = page(2, 2, 5);
        assert!(middle.has_next_page);
        assert!(middle.has_prev_page);

        let last = page(3, 2, 5);
        assert!(!last.has_next_page);
        assert!(last.has_prev_page);
    }

    #[test]
    fn empty_match_set_has_no_pages() {
        let empty = page(1, 50, 0);
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.count, 0);
        assert!(!empty.has_next_page);
        assert!(!empty.has_prev_page);
    }

    #[test]
    fn page_past_the_end_only_looks_backwards() {
        let beyond = page(7, 10, 25);
        assert_eq!(beyond.total_pages, 3);
        assert!(!beyond.has_next_page);
        assert!(beyond.has_prev_page);
    }

    #[test]
    fn offsets_partition_the_match_set() {
        for count in 0..40_i64 {
            for limit in 1..8_i64 {
                let pages = total_pages(count, limit);
                let mut covered = 0;
                for p in 1..=pages {
                    let request = PageRequest { page: p, limit };
                    assert_eq!(request.offset(), covered, "gap or overlap at page {p}");
                    covered += limit.min(count - request.offset());
                }
                assert_eq!(covered, count);
            }
        }
    }
}
