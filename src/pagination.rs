use serde::Serialize;
use utoipa::ToSchema;

use crate::config::SearchConfig;
use crate::models::RequestDescriptor;

/// Offset/limit window for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
    pub offset: u64,
    pub limit: u64,
}

impl Pagination {
    /// Page window for a 1-based page, with `per_page` clamped to `[1, max_per_page]`.
    #[must_use]
    pub fn new(page: u64, per_page: u64, max_per_page: u64) -> Self {
        let page = page.max(1);
        let per_page = per_page.clamp(1, max_per_page.max(1));
        Self {
            page,
            per_page,
            offset: (page - 1).saturating_mul(per_page),
            limit: per_page,
        }
    }

    #[must_use]
    pub fn from_descriptor(request: &RequestDescriptor, config: &SearchConfig) -> Self {
        Self::new(request.page, request.per_page, config.max_per_page)
    }

    /// Metadata for a response once the total row count is known
    #[must_use]
    pub fn page_info(&self, total_count: u64) -> PageInfo {
        PageInfo::new(self.page, self.per_page, total_count)
    }
}

/// Pagination metadata returned alongside a page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageInfo {
    /// Current page (1-based)
    pub page: u64,
    /// Page size
    pub per_page: u64,
    /// Number of pages, at least 1
    pub num_pages: u64,
    /// Total matching rows
    pub total_count: u64,
}

impl PageInfo {
    #[must_use]
    pub fn new(page: u64, per_page: u64, total_count: u64) -> Self {
        let num_pages = if total_count == 0 {
            1
        } else {
            total_count.div_ceil(per_page.max(1))
        };
        Self {
            page,
            per_page,
            num_pages,
            total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_limit() {
        let pagination = Pagination::new(3, 10, 100);
        assert_eq!(pagination.offset, 20);
        assert_eq!(pagination.limit, 10);
    }

    #[test]
    fn test_first_page() {
        let pagination = Pagination::new(1, 20, 100);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn test_per_page_clamped_to_max() {
        let pagination = Pagination::new(2, 500, 100);
        assert_eq!(pagination.per_page, 100);
        assert_eq!(pagination.offset, 100);
    }

    #[test]
    fn test_zero_values_clamped() {
        let pagination = Pagination::new(0, 0, 0);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, 1);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn test_huge_page_saturates() {
        let pagination = Pagination::new(u64::MAX, 100, 100);
        assert_eq!(pagination.offset, u64::MAX);
    }

    #[test]
    fn test_page_info_rounds_up() {
        let info = PageInfo::new(1, 20, 41);
        assert_eq!(info.num_pages, 3);
        assert_eq!(info.total_count, 41);
    }

    #[test]
    fn test_page_info_exact_multiple() {
        assert_eq!(PageInfo::new(1, 20, 40).num_pages, 2);
    }

    #[test]
    fn test_page_info_empty_is_one_page() {
        assert_eq!(PageInfo::new(1, 20, 0).num_pages, 1);
    }

    #[test]
    fn test_page_info_zero_per_page() {
        assert_eq!(PageInfo::new(1, 0, 7).num_pages, 7);
    }

    #[test]
    fn test_page_info_serializes() {
        let json = serde_json::to_value(PageInfo::new(2, 10, 25)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 2, "per_page": 10, "num_pages": 3, "total_count": 25})
        );
    }
}
