//! Wire shapes of the directory's JSON resources.
//!
//! These mirror what content authors write by hand, so most fields are
//! optional and loosely typed. [`crate::normalize`] turns them into the
//! strict domain types from `nutmeg_core`.

use serde::Deserialize;

/// `category` / `cuisine`: a single tag or an ordered list of tags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawCategory {
    One(String),
    Many(Vec<String>),
}

impl RawCategory {
    #[must_use]
    pub fn into_tags(self) -> Vec<String> {
        match self {
            RawCategory::One(tag) => vec![tag],
            RawCategory::Many(tags) => tags,
        }
    }
}

/// One restaurant record as written in a town file or the featured list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    pub name: String,
    /// Only featured entries carry a town; town files get theirs from the loader.
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub category: Option<RawCategory>,
    /// Legacy spelling of `category`.
    #[serde(default)]
    pub cuisine: Option<RawCategory>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub dark_bg: Option<serde_json::Value>,
    #[serde(default)]
    pub lat: Option<serde_json::Value>,
    #[serde(default)]
    pub lng: Option<serde_json::Value>,
    #[serde(default)]
    pub enhanced: Option<serde_json::Value>,
}

/// A per-town file: `{ "featured": [...], "restaurants": [...], "categories": [...] }`.
///
/// Records stay as raw JSON values so one bad record does not sink the file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTownFile {
    /// The town page's own curated shelf.
    #[serde(default)]
    pub featured: Vec<serde_json::Value>,
    #[serde(default)]
    pub restaurants: Vec<serde_json::Value>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// The featured list, either wrapped (`{ "featured": [...] }`) or bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawFeaturedFile {
    Bare(Vec<serde_json::Value>),
    Wrapped {
        #[serde(default)]
        featured: Vec<serde_json::Value>,
    },
}

impl RawFeaturedFile {
    #[must_use]
    pub fn into_records(self) -> Vec<serde_json::Value> {
        match self {
            RawFeaturedFile::Bare(records) | RawFeaturedFile::Wrapped { featured: records } => {
                records
            }
        }
    }
}
