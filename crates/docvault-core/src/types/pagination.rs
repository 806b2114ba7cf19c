//! Pagination parameters for document listings.

use serde::{Deserialize, Serialize};

/// Page size used when the caller supplies none, or a non-positive one.
pub const DEFAULT_LIMIT: i64 = 10;
/// Page used when the caller supplies none, or a non-positive one.
pub const DEFAULT_PAGE: i64 = 1;

/// Normalized `limit`/`page` pair.
///
/// Always holds positive values; construct it through [`ListParams::new`] or
/// [`ListParams::parse`] so the defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    limit: i64,
    page: i64,
}

impl ListParams {
    /// Apply defaults to raw values: absent or `<= 0` falls back to
    /// [`DEFAULT_LIMIT`] / [`DEFAULT_PAGE`].
    pub fn new(limit: Option<i64>, page: Option<i64>) -> Self {
        Self {
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
            page: page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE),
        }
    }

    /// Build from raw query-string values. Unparseable input is treated as
    /// absent rather than rejected.
    pub fn parse(limit: Option<&str>, page: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<i64>().ok());
        Self::new(parse(limit), parse(page))
    }

    /// SQL `LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// 1-based page number.
    pub fn page(&self) -> i64 {
        self.page
    }

    /// SQL `OFFSET`: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}
