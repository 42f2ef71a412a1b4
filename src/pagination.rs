//! This module defines the common functionality for paging data.

use serde::Deserialize;

/// The config for pagination.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of rows per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a request may ask for.
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// The raw, unvalidated paging fields of a request query string.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    /// The requested 1-based page number.
    pub page: Option<u64>,
    /// The requested number of rows per page.
    pub page_size: Option<u64>,
}

/// A sanitized page request: `page` is 1-based and at least 1, `page_size` is
/// within the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// The 1-based page number.
    pub page: u64,
    /// The number of rows per page.
    pub page_size: u64,
}

impl PageParams {
    /// Sanitize the paging fields of a request.
    ///
    /// A missing or zero page becomes the default page, and a page size
    /// outside `1..=max_page_size` falls back to the default page size.
    pub fn sanitized(query: PageQuery, config: &PaginationConfig) -> Self {
        let page = match query.page {
            Some(page) if page >= 1 => page,
            _ => config.default_page,
        };

        let page_size = match query.page_size {
            Some(size) if (1..=config.max_page_size).contains(&size) => size,
            _ => config.default_page_size,
        };

        Self { page, page_size }
    }

    /// The number of rows to skip to reach this page.
    ///
    /// Saturates rather than overflowing: a page number near `u64::MAX` can
    /// only ever address rows past the end of any real data set.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// The number of pages needed to show `total` rows at `page_size` rows per
/// page.
///
/// Upstream sanitization keeps `page_size` at least 1, but a zero page size
/// must not crash the divide: it is treated as 0 total pages.
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }

    total.div_ceil(page_size)
}

#[cfg(test)]
mod pagination_tests {
    use super::{PageParams, PageQuery, PaginationConfig, total_pages};

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(47, 20), 3);
    }

    #[test]
    fn total_pages_matches_ceiling_division() {
        for total in 0..=1000 {
            for page_size in 1..=100 {
                let want = (total + page_size - 1) / page_size;
                let got = total_pages(total, page_size);

                assert_eq!(
                    got, want,
                    "want {want} pages for total {total} and page size {page_size}, got {got}"
                );
            }
        }
    }

    #[test]
    fn total_pages_with_zero_page_size_does_not_divide() {
        assert_eq!(total_pages(47, 0), 0);
    }

    #[test]
    fn total_pages_is_zero_for_no_rows() {
        assert_eq!(total_pages(0, 20), 0);
    }

    #[test]
    fn sanitized_applies_defaults() {
        let params = PageParams::sanitized(PageQuery::default(), &PaginationConfig::default());

        assert_eq!(
            params,
            PageParams {
                page: 1,
                page_size: 20
            }
        );
    }

    #[test]
    fn sanitized_rejects_zero_page() {
        let query = PageQuery {
            page: Some(0),
            page_size: Some(10),
        };

        let params = PageParams::sanitized(query, &PaginationConfig::default());

        assert_eq!(
            params,
            PageParams {
                page: 1,
                page_size: 10
            }
        );
    }

    #[test]
    fn sanitized_rejects_oversized_page_size() {
        let query = PageQuery {
            page: Some(3),
            page_size: Some(1000),
        };

        let params = PageParams::sanitized(query, &PaginationConfig::default());

        assert_eq!(
            params,
            PageParams {
                page: 3,
                page_size: 20
            }
        );
    }

    #[test]
    fn offset_saturates_on_a_huge_page_number() {
        let params = PageParams {
            page: u64::MAX,
            page_size: 100,
        };

        assert_eq!(params.offset(), u64::MAX);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let params = PageParams {
            page: 3,
            page_size: 20,
        };

        assert_eq!(params.offset(), 40);
    }
}
