use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The upstream catalog sources this service aggregates.
///
/// The set is fixed: each variant corresponds to one provider adapter and
/// serializes to the provider name the clients already know.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartSource {
    AutoPartsPlus,
    RepuestosMax,
    GlobalParts,
}

impl PartSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartSource::AutoPartsPlus => "AutoPartsPlus",
            PartSource::RepuestosMax => "RepuestosMax",
            PartSource::GlobalParts => "GlobalParts",
        }
    }
}

impl std::fmt::Display for PartSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One provider's quote for a part.
///
/// Offers are immutable once created; a part's offer list grows only by
/// appending offers from further provider passes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOffer {
    /// Which provider quoted this offer.
    #[serde(rename = "provider")]
    pub source: PartSource,

    /// Quoted unit price.
    pub price: Decimal,

    /// Quantity the provider reports as on hand.
    pub stock: i64,

    /// The provider's own identifier for the part, when it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_sku: Option<String>,

    /// When this offer was observed.
    pub last_updated: DateTime<Utc>,
}

impl ProviderOffer {
    /// An offer counts as available when the provider has stock.
    pub fn available(&self) -> bool {
        self.stock > 0
    }
}

/// The merged, provider-agnostic part record.
///
/// `sku` is the cross-provider merge key and is never empty. `price` and
/// `stock` are derived from `offers` (see the merge module) and are never
/// set independently; `offers` is never empty for a merged part and is kept
/// ascending by price.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub sku: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// All providers' quotes for this SKU, ascending by price.
    #[serde(rename = "providers")]
    pub offers: Vec<ProviderOffer>,
}
