//! Normalization from raw JSON records to `nutmeg_core` domain types.
//!
//! Parsing is lenient at the record level: a record that cannot be read is
//! logged and skipped so the rest of its file still loads. A file that is
//! not valid JSON at all is an error for the caller to degrade.

use nutmeg_core::{normalize_categories, Coordinates, FeaturedEntry, Restaurant};

use crate::error::LoaderError;
use crate::types::{RawFeaturedFile, RawListing, RawTownFile};

/// Everything one town file contributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TownListing {
    pub town: String,
    /// Town-local featured entries, each stamped with `town` when the record
    /// names none.
    pub featured: Vec<FeaturedEntry>,
    pub restaurants: Vec<Restaurant>,
    pub categories: Vec<String>,
}

/// Parse a town file body, stamping every restaurant with `town`.
///
/// # Errors
///
/// Returns [`LoaderError::Deserialize`] if the body is not a JSON object of
/// the town-file shape.
pub fn parse_town_file(body: &str, town: &str) -> Result<TownListing, LoaderError> {
    let raw: RawTownFile =
        serde_json::from_str(body).map_err(|source| LoaderError::Deserialize {
            context: format!("town file for {town}"),
            source,
        })?;

    let featured = raw
        .featured
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| read_listing(value, town, idx))
        .map(|listing| {
            let mut entry = normalize_featured(listing);
            entry.town.get_or_insert_with(|| town.to_string());
            entry
        })
        .collect();

    let restaurants = raw
        .restaurants
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| read_listing(value, town, idx))
        .map(|listing| normalize_restaurant(listing, town))
        .collect();

    Ok(TownListing {
        town: town.to_string(),
        featured,
        restaurants,
        categories: normalize_categories(raw.categories),
    })
}

/// Parse the featured list body.
///
/// # Errors
///
/// Returns [`LoaderError::Deserialize`] if the body is neither a
/// `{ "featured": [...] }` object nor a bare array.
pub fn parse_featured_file(body: &str) -> Result<Vec<FeaturedEntry>, LoaderError> {
    let raw: RawFeaturedFile =
        serde_json::from_str(body).map_err(|source| LoaderError::Deserialize {
            context: "featured list".to_string(),
            source,
        })?;

    Ok(raw
        .into_records()
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| read_listing(value, "featured", idx))
        .map(normalize_featured)
        .collect())
}

fn read_listing(value: serde_json::Value, context: &str, idx: usize) -> Option<RawListing> {
    match serde_json::from_value::<RawListing>(value) {
        Ok(listing) => Some(listing),
        Err(err) => {
            tracing::warn!(
                context,
                index = idx,
                error = %err,
                "skipping unreadable restaurant record"
            );
            None
        }
    }
}

/// Normalizes a [`RawListing`] from a town file into a [`Restaurant`].
#[must_use]
pub fn normalize_restaurant(listing: RawListing, town: &str) -> Restaurant {
    let categories = listing_categories(&listing);
    let coordinates = listing_coordinates(&listing);
    Restaurant {
        name: listing.name,
        town: town.to_string(),
        categories,
        address: non_empty(listing.address),
        phone: non_empty(listing.phone),
        website: non_empty(listing.website),
        image: non_empty(listing.image),
        dark_bg: is_true(listing.dark_bg.as_ref()),
        coordinates,
        enhanced: is_true(listing.enhanced.as_ref()),
    }
}

/// Normalizes a [`RawListing`] from the featured list into a [`FeaturedEntry`].
#[must_use]
pub fn normalize_featured(listing: RawListing) -> FeaturedEntry {
    let categories = listing_categories(&listing);
    let coordinates = listing_coordinates(&listing);
    FeaturedEntry {
        name: listing.name,
        town: non_empty(listing.town),
        categories,
        address: non_empty(listing.address),
        phone: non_empty(listing.phone),
        website: non_empty(listing.website),
        image: non_empty(listing.image),
        dark_bg: is_true(listing.dark_bg.as_ref()),
        coordinates,
        enhanced: is_true(listing.enhanced.as_ref()),
    }
}

/// `category` wins over the legacy `cuisine` field whenever it is present.
fn listing_categories(listing: &RawListing) -> Vec<String> {
    listing
        .category
        .clone()
        .or_else(|| listing.cuisine.clone())
        .map(|raw| normalize_categories(raw.into_tags()))
        .unwrap_or_default()
}

fn listing_coordinates(listing: &RawListing) -> Option<Coordinates> {
    Coordinates::from_parts(
        listing.lat.as_ref().and_then(coerce_f64),
        listing.lng.as_ref().and_then(coerce_f64),
    )
}

/// Accept numbers and numeric strings; anything else is absent.
fn coerce_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Flags count only when they are the JSON boolean `true`.
fn is_true(value: Option<&serde_json::Value>) -> bool {
    matches!(value, Some(serde_json::Value::Bool(true)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
