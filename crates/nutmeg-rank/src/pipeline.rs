//! The ranking pipeline: filter, decorate, sort.
//!
//! Stages run in a fixed order (town, category, free text, distance) over a
//! borrowed collection and emit decorated copies. Nothing here fails: an
//! empty input or an over-narrow query yields an empty vector and the caller
//! picks an [`EmptyState`] to show.

use std::cmp::Ordering;

use nutmeg_core::{Coordinates, Restaurant};
use serde::Serialize;

use crate::collate::compare_names;
use crate::distance::distance_between;
use crate::tier::{Badge, BadgePolicy, FeaturedIndex, Tier, TierOrder};

/// Radius of the "Near Me" view.
pub const NEAR_ME_RADIUS_MILES: f64 = 5.0;

/// Featured entries shown above the "Near Me" list.
pub const NEAR_ME_SHELF_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Exact membership, as a category tab selects.
    Exact(String),
    /// Case-insensitive substring of any category, as search does.
    Contains(String),
}

impl CategoryFilter {
    /// Filter for a category tab. The "All" tab filters nothing.
    #[must_use]
    pub fn tab(label: &str) -> Option<Self> {
        (label != "All").then(|| Self::Exact(label.to_string()))
    }

    fn admits(&self, categories: &[String]) -> bool {
        match self {
            Self::Exact(wanted) => categories.iter().any(|c| c == wanted),
            Self::Contains(needle) => {
                let needle = needle.to_lowercase();
                categories.iter().any(|c| c.to_lowercase().contains(&needle))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Radius {
    /// Every listing with coordinates.
    #[default]
    Unbounded,
    /// Inclusive cap in miles.
    Within(f64),
}

impl Radius {
    #[must_use]
    pub fn admits(self, miles: f64) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Within(cap) => miles <= cap,
        }
    }
}

/// One pipeline invocation. The default query filters nothing and sorts
/// featured listings first.
#[derive(Debug, Clone, Default)]
pub struct RankQuery {
    pub town: Option<String>,
    pub category: Option<CategoryFilter>,
    pub text: Option<String>,
    pub location: Option<Coordinates>,
    pub radius: Radius,
    pub tier_order: TierOrder,
    pub badge_policy: BadgePolicy,
}

impl RankQuery {
    #[must_use]
    pub fn with_town(mut self, town: impl Into<String>) -> Self {
        self.town = Some(town.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Coordinates, radius: Radius) -> Self {
        self.location = Some(location);
        self.radius = radius;
        self
    }

    #[must_use]
    pub fn with_tier_order(mut self, order: TierOrder) -> Self {
        self.tier_order = order;
        self
    }

    #[must_use]
    pub fn with_badge_policy(mut self, policy: BadgePolicy) -> Self {
        self.badge_policy = policy;
        self
    }

    /// Lowercased search text, or `None` when blank.
    fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }
}

/// A restaurant decorated with everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub distance_miles: Option<f64>,
    pub is_featured: bool,
    pub is_enhanced: bool,
    pub resolved_website: Option<String>,
    pub tier: Tier,
    pub badge: Option<Badge>,
}

impl RankedResult {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.restaurant.name
    }

    /// Phone and extras are shown for featured and premium listings only.
    #[must_use]
    pub fn phone_visible(&self) -> bool {
        self.is_featured || self.is_enhanced
    }
}

pub(crate) fn decorate(
    restaurant: &Restaurant,
    featured: &FeaturedIndex,
    distance_miles: Option<f64>,
    policy: BadgePolicy,
) -> RankedResult {
    let class = featured.classify(restaurant);
    RankedResult {
        tier: class.tier(),
        badge: class.badge(policy),
        is_featured: class.is_featured,
        is_enhanced: class.is_enhanced,
        resolved_website: class.resolved_website,
        distance_miles,
        restaurant: restaurant.clone(),
    }
}

fn matches_text(restaurant: &Restaurant, needle: &str) -> bool {
    restaurant.name.to_lowercase().contains(needle)
        || restaurant.town.to_lowercase().contains(needle)
        || restaurant
            .categories
            .iter()
            .any(|c| c.to_lowercase().contains(needle))
}

/// Run the pipeline over `collection`.
///
/// With a location, listings without coordinates are dropped and results
/// come back nearest first. Without one, results are ordered by the query's
/// [`TierOrder`] and then by name. Equal keys keep load order.
#[must_use]
pub fn rank(
    collection: &[Restaurant],
    featured: &FeaturedIndex,
    query: &RankQuery,
) -> Vec<RankedResult> {
    let needle = query.needle();

    let mut results: Vec<RankedResult> = collection
        .iter()
        .filter(|r| query.town.as_deref().is_none_or(|town| r.town == town))
        .filter(|r| {
            query
                .category
                .as_ref()
                .is_none_or(|filter| filter.admits(&r.categories))
        })
        .filter(|r| needle.as_deref().is_none_or(|n| matches_text(r, n)))
        .filter_map(|r| match query.location {
            None => Some((r, None)),
            Some(from) => {
                let to = r.coordinates?;
                let miles = distance_between(from, to);
                query.radius.admits(miles).then_some((r, Some(miles)))
            }
        })
        .map(|(r, miles)| decorate(r, featured, miles, query.badge_policy))
        .collect();

    if query.location.is_some() {
        results.sort_by(|a, b| by_distance(a, b).then_with(|| compare_names(a.name(), b.name())));
    } else {
        let order = query.tier_order;
        results.sort_by(|a, b| {
            let score = |r: &RankedResult| order.score(r.is_featured, r.is_enhanced);
            score(b)
                .cmp(&score(a))
                .then_with(|| compare_names(a.name(), b.name()))
        });
    }

    results
}

fn by_distance(a: &RankedResult, b: &RankedResult) -> Ordering {
    let miles = |r: &RankedResult| r.distance_miles.unwrap_or(f64::INFINITY);
    miles(a).total_cmp(&miles(b))
}

/// The first `n` results plus how many were cut.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Shelf {
    pub items: Vec<RankedResult>,
    pub total: usize,
}

impl Shelf {
    #[must_use]
    pub fn top(mut results: Vec<RankedResult>, n: usize) -> Self {
        let total = results.len();
        results.truncate(n);
        Self {
            items: results,
            total,
        }
    }

    #[must_use]
    pub fn hidden(&self) -> usize {
        self.total - self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Why a result list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// A search ran and nothing matched.
    NoMatches,
    /// Nothing to show before any search, e.g. an empty featured list.
    NoData,
    /// A location query found no listing with coordinates in range.
    NoLocationData,
}

impl EmptyState {
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn headline(self) -> &'static str {
        "No restaurants found"
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::NoMatches => "Try a different search term.",
            Self::NoData => "Check back soon for featured restaurants.",
            Self::NoLocationData => "No restaurants found with location data.",
        }
    }
}
