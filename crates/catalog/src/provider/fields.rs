//! Field fallback and defensive numeric coercion for upstream payloads.
//!
//! Upstream schemas disagree between listing and detail endpoints and
//! across provider API versions, so every attribute is extracted through
//! an ordered fallback chain, and numeric fields tolerate both JSON
//! numbers and quoted strings.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Deserialize;

/// A numeric field as the providers actually send it: sometimes a JSON
/// number, sometimes a quoted string.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Coerce to a price. Anything that does not parse as a finite number
    /// is zero, never NaN and never an error.
    pub(crate) fn as_price(&self) -> Decimal {
        self.as_decimal().unwrap_or(Decimal::ZERO)
    }

    /// Coerce to a quantity: truncated toward zero, never rounded.
    pub(crate) fn as_quantity(&self) -> i64 {
        self.as_decimal()
            .and_then(|value| value.trunc().to_i64())
            .unwrap_or(0)
    }

    fn as_decimal(&self) -> Option<Decimal> {
        match self {
            RawNumber::Number(value) => Decimal::from_f64(*value),
            RawNumber::Text(text) => text.trim().parse::<Decimal>().ok(),
        }
    }
}

/// First candidate that is present and non-empty.
pub(crate) fn first_filled<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
