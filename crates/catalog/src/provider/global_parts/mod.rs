//! GlobalParts adapter.
//!
//! # Endpoints
//!
//! - Catalog: `GET {base}/api/globalparts/inventory/catalog?page=&itemsPerPage=`
//! - Single part: `GET {base}/api/globalparts/inventory/search?partNumber=`
//!
//! GlobalParts speaks an enterprise envelope dialect: catalog items nest
//! under `ResponseEnvelope.Body.CatalogListing.Items` and search hits under
//! `ResponseEnvelope.Body.SearchResults.Items`, with PascalCase field
//! groups (`ProductDetails`, `PricingInfo`, `AvailabilityInfo`,
//! `MediaInfo`). Both endpoints have also been seen answering with a flat
//! `items` list, a bare array, or one naked item, so the response types
//! cover every observed shape.

use async_trait::async_trait;
use chrono::Utc;
use log::warn;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::CatalogError;
use crate::models::{Part, PartSource, ProviderOffer};
use crate::provider::{build_client, first_filled, get_json, PartsProvider, RawNumber};

const SOURCE: PartSource = PartSource::GlobalParts;

/// A raw GlobalParts item, enveloped and flat field variants combined.
#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(rename = "ItemHeader")]
    item_header: Option<ItemHeader>,
    #[serde(rename = "partNumber")]
    part_number: Option<String>,
    sku: Option<String>,
    #[serde(rename = "ProductDetails")]
    product_details: Option<ProductDetails>,
    description: Option<String>,
    name: Option<String>,
    #[serde(rename = "fullDescription")]
    full_description: Option<String>,
    #[serde(rename = "PricingInfo")]
    pricing_info: Option<PricingInfo>,
    #[serde(rename = "unitPrice")]
    unit_price: Option<RawNumber>,
    #[serde(rename = "AvailabilityInfo")]
    availability_info: Option<AvailabilityInfo>,
    #[serde(rename = "quantityAvailable")]
    quantity_available: Option<RawNumber>,
    stock: Option<RawNumber>,
    manufacturer: Option<String>,
    category: Option<String>,
    #[serde(rename = "MediaInfo")]
    media_info: Option<MediaInfo>,
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemHeader {
    #[serde(rename = "ExternalReferences")]
    external_references: Option<ExternalReferences>,
}

#[derive(Debug, Deserialize)]
struct ExternalReferences {
    #[serde(rename = "SKU")]
    sku: Option<SkuValue>,
}

#[derive(Debug, Deserialize)]
struct SkuValue {
    #[serde(rename = "Value")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProductDetails {
    #[serde(rename = "NameInfo")]
    name_info: Option<NameInfo>,
    #[serde(rename = "Description")]
    description: Option<DescriptionInfo>,
    #[serde(rename = "BrandInfo")]
    brand_info: Option<BrandInfo>,
    #[serde(rename = "CategoryInfo")]
    category_info: Option<CategoryInfo>,
}

#[derive(Debug, Deserialize)]
struct NameInfo {
    #[serde(rename = "DisplayName")]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DescriptionInfo {
    #[serde(rename = "FullText")]
    full_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BrandInfo {
    #[serde(rename = "BrandName")]
    brand_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CategoryInfo {
    #[serde(rename = "PrimaryCategory")]
    primary_category: Option<PrimaryCategory>,
}

#[derive(Debug, Deserialize)]
struct PrimaryCategory {
    #[serde(rename = "Name")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PricingInfo {
    #[serde(rename = "ListPrice")]
    list_price: Option<ListPrice>,
}

#[derive(Debug, Deserialize)]
struct ListPrice {
    #[serde(rename = "Amount")]
    amount: Option<RawNumber>,
}

#[derive(Debug, Deserialize)]
struct AvailabilityInfo {
    #[serde(rename = "QuantityInfo")]
    quantity_info: Option<QuantityInfo>,
}

#[derive(Debug, Deserialize)]
struct QuantityInfo {
    #[serde(rename = "AvailableQuantity")]
    available_quantity: Option<RawNumber>,
}

#[derive(Debug, Deserialize)]
struct MediaInfo {
    #[serde(rename = "Images")]
    #[serde(default)]
    images: Vec<ImageRef>,
}

#[derive(Debug, Deserialize)]
struct ImageRef {
    #[serde(rename = "URL")]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(rename = "Body")]
    body: Option<EnvelopeBody>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeBody {
    #[serde(rename = "CatalogListing")]
    catalog_listing: Option<ItemList>,
    #[serde(rename = "SearchResults")]
    search_results: Option<ItemList>,
}

#[derive(Debug, Deserialize)]
struct ItemList {
    #[serde(rename = "Items")]
    #[serde(default)]
    items: Vec<RawItem>,
}

/// Catalog answer: a bare array, or an object carrying the deep envelope
/// and/or a flat `items` list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogResponse {
    Bare(Vec<RawItem>),
    Enveloped(CatalogEnvelope),
}

#[derive(Debug, Deserialize)]
struct CatalogEnvelope {
    #[serde(rename = "ResponseEnvelope")]
    response_envelope: Option<ResponseEnvelope>,
    #[serde(default)]
    items: Vec<RawItem>,
}

impl CatalogResponse {
    fn into_items(self) -> Vec<RawItem> {
        match self {
            CatalogResponse::Bare(items) => items,
            CatalogResponse::Enveloped(envelope) => {
                let CatalogEnvelope {
                    response_envelope,
                    items,
                } = envelope;
                response_envelope
                    .and_then(|env| env.body)
                    .and_then(|body| body.catalog_listing)
                    .map(|listing| listing.items)
                    .unwrap_or(items)
            }
        }
    }
}

/// Single-part answer: a bare list, the search envelope, a flat `items`
/// wrapper, or one naked item. The envelope variant only matches when
/// `ResponseEnvelope` is actually present.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PartResponse {
    Bare(Vec<RawItem>),
    Search(SearchEnvelope),
    Wrapped(ItemsEnvelope),
    Single(Box<RawItem>),
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "ResponseEnvelope")]
    response_envelope: ResponseEnvelope,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct ItemsEnvelope {
    items: Vec<RawItem>,
}

impl PartResponse {
    fn into_first(self) -> Option<RawItem> {
        match self {
            PartResponse::Bare(items) => items.into_iter().next(),
            PartResponse::Search(envelope) => {
                let SearchEnvelope {
                    response_envelope,
                    items,
                } = envelope;
                response_envelope
                    .body
                    .and_then(|body| body.search_results)
                    .map(|results| results.items)
                    .unwrap_or_default()
                    .into_iter()
                    .next()
                    .or_else(|| items.into_iter().next())
            }
            PartResponse::Wrapped(envelope) => envelope.items.into_iter().next(),
            PartResponse::Single(item) => Some(*item),
        }
    }
}

/// Map one raw item into a canonical part carrying this provider's offer.
/// Items without a usable SKU are dropped.
fn normalize(raw: RawItem) -> Option<Part> {
    let sku = first_filled([
        raw.item_header
            .as_ref()
            .and_then(|header| header.external_references.as_ref())
            .and_then(|refs| refs.sku.as_ref())
            .and_then(|sku| sku.value.as_deref()),
        raw.part_number.as_deref(),
        raw.sku.as_deref(),
    ])?;

    let details = raw.product_details.as_ref();
    let price = raw
        .pricing_info
        .as_ref()
        .and_then(|pricing| pricing.list_price.as_ref())
        .and_then(|list| list.amount.as_ref())
        .or(raw.unit_price.as_ref())
        .map(RawNumber::as_price)
        .unwrap_or_default();
    let stock = raw
        .availability_info
        .as_ref()
        .and_then(|availability| availability.quantity_info.as_ref())
        .and_then(|quantity| quantity.available_quantity.as_ref())
        .or(raw.quantity_available.as_ref())
        .or(raw.stock.as_ref())
        .map(RawNumber::as_quantity)
        .unwrap_or(0);

    Some(Part {
        name: first_filled([
            details
                .and_then(|d| d.name_info.as_ref())
                .and_then(|info| info.display_name.as_deref()),
            raw.description.as_deref(),
            raw.name.as_deref(),
        ])
        .unwrap_or_default(),
        description: first_filled([
            details
                .and_then(|d| d.description.as_ref())
                .and_then(|info| info.full_text.as_deref()),
            raw.full_description.as_deref(),
            raw.description.as_deref(),
        ]),
        price,
        stock,
        brand: first_filled([
            details
                .and_then(|d| d.brand_info.as_ref())
                .and_then(|info| info.brand_name.as_deref()),
            raw.manufacturer.as_deref(),
        ]),
        model: None,
        year: None,
        image: first_filled([
            raw.media_info
                .as_ref()
                .and_then(|media| media.images.first())
                .and_then(|image| image.url.as_deref()),
            raw.image.as_deref(),
        ]),
        category: first_filled([
            details
                .and_then(|d| d.category_info.as_ref())
                .and_then(|info| info.primary_category.as_ref())
                .and_then(|primary| primary.name.as_deref()),
            raw.category.as_deref(),
        ]),
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

/// Adapter for the GlobalParts API.
pub struct GlobalPartsProvider {
    client: Client,
    base_url: String,
}

impl GlobalPartsProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    async fn catalog(&self, page: u32, items_per_page: u32) -> Result<Vec<Part>, CatalogError> {
        let url = format!(
            "{}/api/globalparts/inventory/catalog?page={}&itemsPerPage={}",
            self.base_url, page, items_per_page
        );
        let response: CatalogResponse = get_json(&self.client, SOURCE, &url).await?;
        Ok(response
            .into_items()
            .into_iter()
            .filter_map(normalize)
            .collect())
    }

    async fn part(&self, part_number: &str) -> Result<Option<Part>, CatalogError> {
        let url = format!(
            "{}/api/globalparts/inventory/search?partNumber={}",
            self.base_url,
            urlencoding::encode(part_number)
        );
        let response: PartResponse = get_json(&self.client, SOURCE, &url).await?;
        Ok(response.into_first().and_then(normalize))
    }
}

#[async_trait]
impl PartsProvider for GlobalPartsProvider {
    fn id(&self) -> PartSource {
        SOURCE
    }

    async fn fetch_catalog_page(&self, page: u32, limit: u32) -> Vec<Part> {
        match self.catalog(page, limit).await {
            Ok(parts) => parts,
            Err(err) => {
                warn!("GlobalParts catalog fetch failed: {}", err);
                Vec::new()
            }
        }
    }

    async fn fetch_part(&self, sku: &str) -> Option<Part> {
        match self.part(sku).await {
            Ok(part) => part,
            Err(err) => {
                warn!("GlobalParts part {} fetch failed: {}", sku, err);
                None
            }
        }
    }
}
