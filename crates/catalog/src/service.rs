//! The aggregate part service: provider fan-out, merge, cache-through.

use std::sync::Arc;

use futures::future::join_all;
use log::debug;

use crate::cache::PartCache;
use crate::merge;
use crate::models::{CatalogPage, CatalogQuery, Part};
use crate::provider::PartsProvider;
use crate::query;

/// Page requested from every upstream when building the merged catalog.
const UPSTREAM_PAGE: u32 = 1;
/// Items requested per upstream for one catalog build.
const UPSTREAM_PAGE_SIZE: u32 = 100;

/// Public contract of the catalog engine, consumed by the HTTP boundary.
///
/// Every build fans out to all providers concurrently and awaits the whole
/// set: latency is bounded by the slowest provider, and a failed provider
/// contributes an empty list rather than stalling or failing the rest
/// (the adapters convert their own failures before the join). There is no
/// retry policy; a degraded request degrades once and the next request
/// starts fresh.
pub struct PartService {
    providers: Vec<Arc<dyn PartsProvider>>,
    cache: PartCache,
}

impl PartService {
    pub fn new(providers: Vec<Arc<dyn PartsProvider>>, cache: PartCache) -> Self {
        Self { providers, cache }
    }

    /// Filtered, paginated view over the merged catalog.
    pub async fn get_catalog(&self, query: &CatalogQuery) -> CatalogPage {
        let parts = self.merged_catalog().await;
        query::apply(&parts, query)
    }

    /// Resolve one part across all providers. `None` when every provider
    /// misses; only found parts are cached.
    pub async fn get_part(&self, sku: &str) -> Option<Part> {
        if let Some(part) = self.cache.part(sku).await {
            return Some(part);
        }

        let results = join_all(
            self.providers
                .iter()
                .map(|provider| provider.fetch_part(sku)),
        )
        .await;
        let found: Vec<Part> = results.into_iter().flatten().collect();
        if found.is_empty() {
            return None;
        }

        // Guarded above; merging a non-empty set cannot fail.
        let merged = merge::merge_parts(found).ok()?;
        self.cache.store_part(merged.clone()).await;
        Some(merged)
    }

    /// Drop every cached result. The next request hits the providers fresh.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    async fn merged_catalog(&self) -> Vec<Part> {
        if let Some(parts) = self.cache.catalog().await {
            return parts;
        }

        let lists = join_all(
            self.providers
                .iter()
                .map(|provider| provider.fetch_catalog_page(UPSTREAM_PAGE, UPSTREAM_PAGE_SIZE)),
        )
        .await;
        let merged = merge::fold_catalog(lists);
        debug!("merged catalog rebuilt: {} parts", merged.len());
        self.cache.store_catalog(merged.clone()).await;
        merged
    }
}
