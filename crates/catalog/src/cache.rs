//! TTL-bounded memoization of merged parts and the full catalog.

use std::time::Duration;

use moka::future::Cache;

use crate::models::Part;

/// Time-to-live shared by the part store and the catalog store.
const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// In-memory cache for merged results: single parts keyed by SKU plus one
/// slot for the full merged catalog.
///
/// Constructed explicitly and injected into the service, never a hidden
/// singleton; `clear` is the only invalidation hook besides TTL expiry.
/// Entries are replaced whole, never patched.
pub struct PartCache {
    parts: Cache<String, Part>,
    catalog: Cache<(), Vec<Part>>,
}

impl PartCache {
    /// Cache with the standard 5 minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(CACHE_TTL)
    }

    /// Cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            parts: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(10_000)
                .build(),
            catalog: Cache::builder().time_to_live(ttl).max_capacity(1).build(),
        }
    }

    /// Cached merged part for a SKU, if still fresh.
    pub async fn part(&self, sku: &str) -> Option<Part> {
        self.parts.get(sku).await
    }

    pub async fn store_part(&self, part: Part) {
        self.parts.insert(part.sku.clone(), part).await;
    }

    /// Cached full merged catalog, if still fresh.
    pub async fn catalog(&self) -> Option<Vec<Part>> {
        self.catalog.get(&()).await
    }

    pub async fn store_catalog(&self, parts: Vec<Part>) {
        self.catalog.insert((), parts).await;
    }

    /// Empty both stores. The next request recomputes from the providers.
    pub fn clear(&self) {
        self.parts.invalidate_all();
        self.catalog.invalidate_all();
    }
}

impl Default for PartCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PartSource, ProviderOffer};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn sample(sku: &str) -> Part {
        Part {
            sku: sku.to_string(),
            name: "Brake disc".to_string(),
            description: None,
            price: Decimal::from(30),
            stock: 2,
            brand: None,
            model: None,
            year: None,
            image: None,
            category: None,
            offers: vec![ProviderOffer {
                source: PartSource::GlobalParts,
                price: Decimal::from(30),
                stock: 2,
                provider_sku: None,
                last_updated: Utc::now(),
            }],
        }
    }

    #[tokio::test]
    async fn stored_parts_come_back_by_sku() {
        let cache = PartCache::new();
        cache.store_part(sample("DSC-001")).await;

        let hit = cache.part("DSC-001").await.unwrap();
        assert_eq!(hit.sku, "DSC-001");
        assert!(cache.part("DSC-999").await.is_none());
    }

    #[tokio::test]
    async fn catalog_slot_holds_the_whole_list() {
        let cache = PartCache::new();
        assert!(cache.catalog().await.is_none());

        cache
            .store_catalog(vec![sample("A"), sample("B")])
            .await;
        assert_eq!(cache.catalog().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn clear_empties_both_stores() {
        let cache = PartCache::new();
        cache.store_part(sample("DSC-001")).await;
        cache.store_catalog(vec![sample("DSC-001")]).await;

        cache.clear();
        assert!(cache.part("DSC-001").await.is_none());
        assert!(cache.catalog().await.is_none());
    }

    #[tokio::test]
    async fn entries_expire_after_the_ttl() {
        let cache = PartCache::with_ttl(Duration::from_millis(40));
        cache.store_part(sample("DSC-001")).await;
        cache.store_catalog(vec![sample("DSC-001")]).await;
        assert!(cache.part("DSC-001").await.is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(cache.part("DSC-001").await.is_none());
        assert!(cache.catalog().await.is_none());
    }
}
