//! Error types for catalog aggregation.

use thiserror::Error;

use crate::models::PartSource;

/// Errors raised while aggregating catalog data.
///
/// Provider and network failures only exist inside the adapters: every
/// adapter converts them into an empty contribution before they reach the
/// merge fold, so a dead upstream can never fail an aggregate request.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The provider answered with a non-success status or an otherwise
    /// unusable payload.
    #[error("provider error: {provider}: {message}")]
    Provider {
        provider: PartSource,
        message: String,
    },

    /// Transport-level failure talking to the provider gateway.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Single-item merge invoked with no parts at all. Callers resolve
    /// "not found" before merging, so hitting this is an internal bug,
    /// never a user-facing condition.
    #[error("no parts to merge")]
    NothingToMerge,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_names_the_source() {
        let err = CatalogError::Provider {
            provider: PartSource::GlobalParts,
            message: "HTTP 503".to_string(),
        };
        assert_eq!(format!("{}", err), "provider error: GlobalParts: HTTP 503");
    }

    #[test]
    fn nothing_to_merge_display() {
        assert_eq!(format!("{}", CatalogError::NothingToMerge), "no parts to merge");
    }
}
