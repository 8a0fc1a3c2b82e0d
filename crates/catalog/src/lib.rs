//! partshub catalog core
//!
//! Provider-agnostic part aggregation for the partshub API. Three upstream
//! adapters normalize incompatible provider payloads into one canonical
//! schema, a merge fold combines same-SKU records and derives display
//! price/stock from the accumulated offers, and a query layer serves
//! filtered pages of the merged set through a TTL-bounded cache.
//!
//! # Architecture
//!
//! ```text
//! +-------------------+
//! |    PartService    |  (fan-out, cache-through)
//! +-------------------+
//!     |           |
//!     v           v
//! +--------+  +--------+
//! | Cache  |  | Query  |  (TTL memoization / filter + paginate)
//! +--------+  +--------+
//!     |
//!     v
//! +-------------------+
//! |    Merge fold     |  (one canonical part per SKU)
//! +-------------------+
//!     |
//!     v
//! +-------------------+
//! | Provider adapters |  (AutoPartsPlus, RepuestosMax, GlobalParts)
//! +-------------------+
//! ```
//!
//! # Core types
//!
//! - [`Part`] - the merged, provider-agnostic part record
//! - [`ProviderOffer`] - one provider's price/stock quote
//! - [`PartSource`] - the fixed set of upstream providers
//! - [`CatalogQuery`] / [`CatalogPage`] - query input and paged result
//! - [`PartService`] - the public aggregation contract
//! - [`PartCache`] - injected TTL cache with an explicit lifecycle

pub mod cache;
pub mod errors;
pub mod merge;
pub mod models;
pub mod provider;
pub mod query;
pub mod service;

pub use cache::PartCache;
pub use errors::CatalogError;
pub use models::{
    CatalogPage, CatalogQuery, Part, PartSource, ProviderOffer, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use provider::{
    AutoPartsPlusProvider, GlobalPartsProvider, PartsProvider, RepuestosMaxProvider,
};
pub use service::PartService;
