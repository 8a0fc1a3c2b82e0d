//! Upstream provider adapters.
//!
//! One module per source, each speaking that provider's endpoint and
//! envelope conventions and normalizing its records into canonical
//! [`Part`](crate::models::Part) values. All three adapters talk to the
//! same mock gateway base URL.

mod fields;
mod traits;

pub mod auto_parts_plus;
pub mod global_parts;
pub mod repuestos_max;

pub use auto_parts_plus::AutoPartsPlusProvider;
pub use global_parts::GlobalPartsProvider;
pub use repuestos_max::RepuestosMaxProvider;
pub use traits::PartsProvider;

pub(crate) use fields::{first_filled, RawNumber};

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::errors::CatalogError;
use crate::models::PartSource;

/// Per-call network timeout for provider requests.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client shared by an adapter's calls.
pub(crate) fn build_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// GET a provider URL and decode the JSON body.
///
/// Status and transport failures come back as errors; the caller's
/// resilience boundary decides what an error degrades to.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    source: PartSource,
    url: &str,
) -> Result<T, CatalogError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(CatalogError::Provider {
            provider: source,
            message: format!("HTTP {}", response.status()),
        });
    }
    Ok(response.json().await?)
}
