//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use docvault_core::types::ListParams;

/// `limit`/`page` query parameters as sent.
///
/// Kept as strings so that malformed numbers fall back to the defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Items per page (default: 10).
    pub limit: Option<String>,
    /// Page number, 1-based (default: 1).
    pub page: Option<String>,
}

impl PaginationParams {
    /// Converts to normalized [`ListParams`].
    pub fn into_list_params(self) -> ListParams {
        ListParams::parse(self.limit.as_deref(), self.page.as_deref())
    }
}
