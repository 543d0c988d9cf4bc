//! Tiering, proximity and search ranking over a loaded restaurant directory.
//!
//! Everything here is synchronous and pure: a [`Directory`] holds one
//! session's collections and every query recomputes its results from them.

pub mod collate;
pub mod directory;
pub mod distance;
pub mod format;
pub mod markers;
pub mod pipeline;
pub mod tier;

pub use collate::compare_names;
pub use directory::{Directory, NearMe, SearchOutcome, TownView};
pub use distance::{distance_between, distance_miles, EARTH_RADIUS_MILES};
pub use format::format_distance;
pub use markers::{directions_url, map_center, markers, MapMarker, SHORELINE_CENTER};
pub use pipeline::{
    rank, CategoryFilter, EmptyState, Radius, RankQuery, RankedResult, Shelf,
    NEAR_ME_RADIUS_MILES, NEAR_ME_SHELF_LEN,
};
pub use tier::{
    classify, Badge, BadgePolicy, Classification, FeaturedIndex, NameMatch, Tier, TierOrder,
};
