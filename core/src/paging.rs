//! Page/limit normalization for the list endpoint.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Raw `?page=&limit=` query parameters, before normalization.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PagingQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// A normalized page window plus the total number of live items.
///
/// `total` does not take part in normalization; the list handler fills it in
/// after counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

impl Paging {
    /// `page <= 0` becomes 1; `limit` outside `1..=100` becomes 10. Missing
    /// values take the same defaults.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p > 0 => p,
            _ => DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(l) if (1..=MAX_LIMIT).contains(&l) => l,
            _ => DEFAULT_LIMIT,
        };
        Self {
            page,
            limit,
            total: 0,
        }
    }

    /// Number of rows to skip. Saturates for pages far past the end.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl From<PagingQuery> for Paging {
    fn from(query: PagingQuery) -> Self {
        Paging::new(query.page, query.limit)
    }
}

impl Default for Paging {
    fn default() -> Self {
        Paging::new(None, None)
    }
}
