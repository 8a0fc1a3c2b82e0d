//! Canonical merge: folding normalized provider records into one part per SKU.
//!
//! The fold owns canonical construction. Adapters hand it lists of
//! single-offer parts; it combines same-SKU records in provider order,
//! fills in missing metadata, accumulates offers, and derives the display
//! price/stock for every merged part.

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::errors::CatalogError;
use crate::models::Part;

/// Fold normalized parts from all providers, in provider order, into one
/// canonical part per SKU, then derive display price/stock for each and
/// sort its offers ascending by price. First occurrence of a SKU seeds the
/// canonical record; later occurrences merge in.
pub fn fold_catalog<I>(lists: I) -> Vec<Part>
where
    I: IntoIterator<Item = Vec<Part>>,
{
    let mut by_sku: IndexMap<String, Part> = IndexMap::new();
    for list in lists {
        for part in list {
            match by_sku.get_mut(&part.sku) {
                Some(existing) => merge_into(existing, part),
                None => {
                    by_sku.insert(part.sku.clone(), part);
                }
            }
        }
    }

    let mut parts: Vec<Part> = by_sku.into_values().collect();
    for part in &mut parts {
        recompute_derived(part);
    }
    parts
}

/// Merge provider results for one SKU into a single canonical part.
///
/// Errs only when called with no parts at all; callers resolve "not found"
/// before merging, so an empty input is an internal bug, never a
/// user-facing condition.
pub fn merge_parts(parts: Vec<Part>) -> Result<Part, CatalogError> {
    let mut parts = parts.into_iter();
    let mut merged = parts.next().ok_or(CatalogError::NothingToMerge)?;
    for part in parts {
        merge_into(&mut merged, part);
    }
    recompute_derived(&mut merged);
    Ok(merged)
}

/// Merge a later occurrence of the same SKU into the canonical record:
/// fill empty descriptive fields, keep the longer description, append the
/// incoming offers.
fn merge_into(existing: &mut Part, incoming: Part) {
    if existing.name.is_empty() && !incoming.name.is_empty() {
        existing.name = incoming.name;
    }
    fill_longer(&mut existing.description, incoming.description);
    fill(&mut existing.brand, incoming.brand);
    fill(&mut existing.model, incoming.model);
    fill(&mut existing.image, incoming.image);
    fill(&mut existing.category, incoming.category);
    if existing.year.is_none() {
        existing.year = incoming.year;
    }
    existing.offers.extend(incoming.offers);
}

/// Keep the existing value unless it is empty or absent.
fn fill(slot: &mut Option<String>, incoming: Option<String>) {
    let blank = slot.as_deref().map_or(true, str::is_empty);
    if blank {
        if let Some(value) = incoming.filter(|value| !value.is_empty()) {
            *slot = Some(value);
        }
    }
}

/// The longer of two non-empty descriptions wins.
fn fill_longer(slot: &mut Option<String>, incoming: Option<String>) {
    let Some(new) = incoming.filter(|value| !value.is_empty()) else {
        return;
    };
    let replace = slot
        .as_deref()
        .map_or(true, |current| current.is_empty() || new.len() > current.len());
    if replace {
        *slot = Some(new);
    }
}

/// Derive display price/stock from the offer list and order offers by price.
///
/// Price comes from the cheapest offer with stock; with nothing in stock
/// the cheapest offer overall still yields a price, and with no offers at
/// all the price is zero. Stock is the highest level any provider reports,
/// in or out of the availability filter.
fn recompute_derived(part: &mut Part) {
    let available_min = part
        .offers
        .iter()
        .filter(|offer| offer.available())
        .map(|offer| offer.price)
        .min();
    let overall_min = part.offers.iter().map(|offer| offer.price).min();
    part.price = available_min.or(overall_min).unwrap_or(Decimal::ZERO);
    part.stock = part
        .offers
        .iter()
        .map(|offer| offer.stock)
        .max()
        .unwrap_or(0);
    part.offers.sort_by(|a, b| a.price.cmp(&b.price));
}
