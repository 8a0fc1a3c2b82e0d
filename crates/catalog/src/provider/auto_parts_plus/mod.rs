//! AutoPartsPlus adapter.
//!
//! # Endpoints
//!
//! - Catalog: `GET {base}/api/autopartsplus/catalog?page=&limit=`
//! - Single part: `GET {base}/api/autopartsplus/parts?sku=`
//!
//! The catalog endpoint usually wraps items as
//! `{ success, parts: [], pagination: {} }` but has also been observed
//! answering with a bare array. The single-part endpoint may answer with a
//! wrapped list, a bare list, or one naked item. Field names differ between
//! the listing and detail payloads, so every attribute is extracted through
//! a fallback chain.

use async_trait::async_trait;
use chrono::Utc;
use log::warn;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::CatalogError;
use crate::models::{Part, PartSource, ProviderOffer};
use crate::provider::{build_client, first_filled, get_json, PartsProvider, RawNumber};

const SOURCE: PartSource = PartSource::AutoPartsPlus;

/// A raw AutoPartsPlus item, listing and detail field variants combined.
#[derive(Debug, Deserialize)]
struct RawItem {
    sku: Option<String>,
    part_id: Option<String>,
    title: Option<String>,
    name: Option<String>,
    desc: Option<String>,
    description: Option<String>,
    unit_price: Option<RawNumber>,
    qty_available: Option<RawNumber>,
    brand_name: Option<String>,
    brand: Option<String>,
    model: Option<String>,
    year: Option<RawNumber>,
    img_urls: Option<Vec<String>>,
    image: Option<String>,
    category_name: Option<String>,
    category: Option<String>,
}

/// Catalog answer: a bare array, or the `{ success, parts, pagination }`
/// wrapper where every field may be missing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogResponse {
    Bare(Vec<RawItem>),
    Wrapped(CatalogEnvelope),
}

#[derive(Debug, Deserialize)]
struct CatalogEnvelope {
    #[serde(default)]
    parts: Vec<RawItem>,
}

impl CatalogResponse {
    fn into_items(self) -> Vec<RawItem> {
        match self {
            CatalogResponse::Bare(items) => items,
            CatalogResponse::Wrapped(envelope) => envelope.parts,
        }
    }
}

/// Single-part answer: a bare list, a wrapper that actually carries a
/// `parts` field, or one naked item.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PartResponse {
    Bare(Vec<RawItem>),
    Wrapped(PartsEnvelope),
    Single(Box<RawItem>),
}

#[derive(Debug, Deserialize)]
struct PartsEnvelope {
    parts: Vec<RawItem>,
}

impl PartResponse {
    fn into_first(self) -> Option<RawItem> {
        match self {
            PartResponse::Bare(items) => items.into_iter().next(),
            PartResponse::Wrapped(envelope) => envelope.parts.into_iter().next(),
            PartResponse::Single(item) => Some(*item),
        }
    }
}

/// Map one raw item into a canonical part carrying this provider's offer.
/// Items without a usable SKU are dropped: the merge key must be non-empty.
fn normalize(raw: RawItem) -> Option<Part> {
    let sku = first_filled([raw.sku.as_deref(), raw.part_id.as_deref()])?;
    let price = raw
        .unit_price
        .as_ref()
        .map(RawNumber::as_price)
        .unwrap_or_default();
    let stock = raw
        .qty_available
        .as_ref()
        .map(RawNumber::as_quantity)
        .unwrap_or(0);

    Some(Part {
        name: first_filled([raw.title.as_deref(), raw.name.as_deref()]).unwrap_or_default(),
        description: first_filled([raw.desc.as_deref(), raw.description.as_deref()]),
        price,
        stock,
        brand: first_filled([raw.brand_name.as_deref(), raw.brand.as_deref()]),
        model: raw.model.filter(|value| !value.is_empty()),
        year: raw.year.as_ref().map(|year| year.as_quantity() as i32),
        image: first_filled([
            raw.img_urls
                .as_deref()
                .and_then(|urls| urls.first())
                .map(String::as_str),
            raw.image.as_deref(),
        ]),
        category: first_filled([raw.category_name.as_deref(), raw.category.as_deref()]),
        offers: vec![ProviderOffer {
            source: SOURCE,
            price,
            stock,
            provider_sku: Some(sku.clone()),
            last_updated: Utc::now(),
        }],
        sku,
    })
}

/// Adapter for the AutoPartsPlus API.
pub struct AutoPartsPlusProvider {
    client: Client,
    base_url: String,
}

impl AutoPartsPlusProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    async fn catalog(&self, page: u32, limit: u32) -> Result<Vec<Part>, CatalogError> {
        let url = format!(
            "{}/api/autopartsplus/catalog?page={}&limit={}",
            self.base_url, page, limit
        );
        let response: CatalogResponse = get_json(&self.client, SOURCE, &url).await?;
        Ok(response
            .into_items()
            .into_iter()
            .filter_map(normalize)
            .collect())
    }

    async fn part(&self, sku: &str) -> Result<Option<Part>, CatalogError> {
        let url = format!(
            "{}/api/autopartsplus/parts?sku={}",
            self.base_url,
            urlencoding::encode(sku)
        );
        let response: PartResponse = get_json(&self.client, SOURCE, &url).await?;
        Ok(response.into_first().and_then(normalize))
    }
}

#[async_trait]
impl PartsProvider for AutoPartsPlusProvider {
    fn id(&self) -> PartSource {
        SOURCE
    }

    async fn fetch_catalog_page(&self, page: u32, limit: u32) -> Vec<Part> {
        match self.catalog(page, limit).await {
            Ok(parts) => parts,
            Err(err) => {
                warn!("AutoPartsPlus catalog fetch failed: {}", err);
                Vec::new()
            }
        }
    }

    async fn fetch_part(&self, sku: &str) -> Option<Part> {
        match self.part(sku).await {
            Ok(part) => part,
            Err(err) => {
                warn!("AutoPartsPlus part {} fetch failed: {}", sku, err);
                None
            }
        }
    }
}
