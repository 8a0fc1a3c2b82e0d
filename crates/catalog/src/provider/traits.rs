//! Provider adapter trait definition.

use async_trait::async_trait;

use crate::models::{Part, PartSource};

/// One upstream catalog source.
///
/// Implementations fetch raw provider payloads and normalize each record
/// into a canonical [`Part`] carrying exactly one offer from this source.
/// The resilience policy lives inside the adapter: network failures, error
/// statuses and malformed payloads are logged and surface as an empty
/// result, never as an error. One dead provider must not break the
/// aggregate catalog.
#[async_trait]
pub trait PartsProvider: Send + Sync {
    /// Which upstream source this adapter speaks for.
    fn id(&self) -> PartSource;

    /// Fetch one normalized catalog page. Failure yields an empty list.
    async fn fetch_catalog_page(&self, page: u32, limit: u32) -> Vec<Part>;

    /// Look up a single part by SKU. Failure or no match yields `None`.
    async fn fetch_part(&self, sku: &str) -> Option<Part>;
}
