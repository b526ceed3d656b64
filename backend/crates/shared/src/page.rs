//! Pagination
//!
//! Page/limit clamping shared by every list endpoint, and the list envelope.

use serde::Serialize;

/// Limit used when the caller omits one or sends an out-of-range value
pub const DEFAULT_LIMIT: i64 = 10;
/// Largest accepted limit
pub const MAX_LIMIT: i64 = 100;

/// Clamped page request
///
/// ## Rules
/// * `page < 1` becomes `1`
/// * `limit <= 0` or `limit > 100` becomes `10`
///
/// ## Examples
/// ```rust
/// use kernel::page::PageRequest;
///
/// let req = PageRequest::new(Some(0), Some(0));
/// assert_eq!(req.page(), 1);
/// assert_eq!(req.limit(), 10);
/// assert_eq!(req.offset(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p >= 1 => p,
            _ => 1,
        };
        let limit = match limit {
            Some(l) if l > 0 && l <= MAX_LIMIT => l,
            _ => DEFAULT_LIMIT,
        };
        Self { page, limit }
    }

    #[inline]
    pub fn page(&self) -> i64 {
        self.page
    }

    #[inline]
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Rows to skip: `(page - 1) * limit`, saturating for absurd pages
    #[inline]
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the unpaged total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    /// Convert every item, keeping paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }

    pub fn into_response(self) -> PageResponse<T> {
        PageResponse {
            items: self.items,
            page: self.request.page(),
            limit: self.request.limit(),
            total: self.total,
        }
    }
}

/// Wire shape: `{items, page, limit, total}`
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = PageRequest::new(None, None);
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(PageRequest::new(Some(0), Some(5)).page(), 1);
        assert_eq!(PageRequest::new(Some(-4), Some(5)).page(), 1);
        assert_eq!(PageRequest::new(Some(1), Some(0)).limit(), 10);
        assert_eq!(PageRequest::new(Some(1), Some(-1)).limit(), 10);
        assert_eq!(PageRequest::new(Some(1), Some(101)).limit(), 10);
        assert_eq!(PageRequest::new(Some(1), Some(100)).limit(), 100);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(Some(3), Some(20)).offset(), 40);
        assert_eq!(PageRequest::new(Some(i64::MAX), Some(100)).offset(), i64::MAX);
    }

    #[test]
    fn test_into_response() {
        let page = Page::new(vec![1, 2], 12, PageRequest::new(Some(2), Some(2)));
        let resp = page.map(|n| n * 10).into_response();
        assert_eq!(resp.items, vec![10, 20]);
        assert_eq!(resp.page, 2);
        assert_eq!(resp.limit, 2);
        assert_eq!(resp.total, 12);
    }
}
