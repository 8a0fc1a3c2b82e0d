use serde::{Deserialize, Serialize};

use super::part::Part;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a client can request; bigger values clamp down to this.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Parameters of one catalog query. All filters are conjunctive.
#[derive(Clone, Debug)]
pub struct CatalogQuery {
    /// 1-based page number; values below 1 clamp to 1.
    pub page: u32,
    /// Page size; clamps into `1..=MAX_PAGE_SIZE`.
    pub limit: u32,
    /// Case-insensitive substring matched against name, description and SKU.
    pub search: Option<String>,
    /// Case-insensitive substring matched against the brand field.
    pub brand: Option<String>,
    /// Case-insensitive substring matched against the model field.
    pub model: Option<String>,
    /// Exact model-year match.
    pub year: Option<i32>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            brand: None,
            model: None,
            year: None,
        }
    }
}

impl CatalogQuery {
    /// A query for one page with no search or filters.
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }
}

/// One page of the filtered catalog, constructed fresh per query.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub parts: Vec<Part>,
    pub page: u32,
    pub limit: u32,
    /// Count of items passing the filters, independent of the page slice.
    pub total: usize,
    pub has_more: bool,
}
