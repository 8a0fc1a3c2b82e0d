//! Canonical catalog models
//!
//! This module contains the wire-facing data types of the aggregate catalog:
//! - `part` - the merged part record (`Part`), per-provider offers
//!   (`ProviderOffer`), and the fixed provider enum (`PartSource`)
//! - `page` - query inputs and paged results (`CatalogQuery`, `CatalogPage`)

mod page;
mod part;

pub use page::{CatalogPage, CatalogQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use part::{Part, PartSource, ProviderOffer};
