//! Presentation tiers: which listings are curated, which are paid, and how
//! that shows up in badges and sort order.

use std::collections::HashMap;

use nutmeg_core::{FeaturedEntry, Restaurant};
use serde::Serialize;

/// Display tier. Featured dominates Premium when both apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Featured,
    Premium,
    Regular,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Featured => write!(f, "featured"),
            Self::Premium => write!(f, "premium"),
            Self::Regular => write!(f, "regular"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Premium,
    Featured,
}

impl Badge {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Premium => "Premium",
            Self::Featured => "Featured",
        }
    }
}

/// Which badge wins when a listing is both featured and enhanced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BadgePolicy {
    /// List cards: the paid badge is shown over the curated one.
    #[default]
    PremiumFirst,
    FeaturedFirst,
}

/// Tier key used when results are not sorted by distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TierOrder {
    #[default]
    FeaturedFirst,
    PremiumFirst,
    /// Only the enhanced flag lifts a listing. Used by the "All" tab.
    PremiumOnly,
    /// No tier key; name order alone.
    Alphabetical,
}

impl TierOrder {
    /// Higher sorts first.
    #[must_use]
    pub fn score(self, is_featured: bool, is_enhanced: bool) -> u8 {
        match self {
            Self::FeaturedFirst => {
                if is_featured {
                    2
                } else {
                    u8::from(is_enhanced)
                }
            }
            Self::PremiumFirst => {
                if is_enhanced {
                    2
                } else {
                    u8::from(is_featured)
                }
            }
            Self::PremiumOnly => u8::from(is_enhanced),
            Self::Alphabetical => 0,
        }
    }
}

/// How restaurant names are joined to featured entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameMatch {
    /// Byte-for-byte, case-sensitive.
    #[default]
    Exact,
    /// Trimmed and lowercased on both sides.
    Normalized,
}

impl NameMatch {
    fn key(self, name: &str) -> String {
        match self {
            Self::Exact => name.to_string(),
            Self::Normalized => name.trim().to_lowercase(),
        }
    }
}

/// Classifier output for one restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub is_featured: bool,
    pub is_enhanced: bool,
    /// Featured entry's website when it has one, else the listing's own.
    pub resolved_website: Option<String>,
}

impl Classification {
    #[must_use]
    pub fn tier(&self) -> Tier {
        if self.is_featured {
            Tier::Featured
        } else if self.is_enhanced {
            Tier::Premium
        } else {
            Tier::Regular
        }
    }

    #[must_use]
    pub fn badge(&self, policy: BadgePolicy) -> Option<Badge> {
        match policy {
            BadgePolicy::PremiumFirst if self.is_enhanced => Some(Badge::Premium),
            BadgePolicy::PremiumFirst if self.is_featured => Some(Badge::Featured),
            BadgePolicy::FeaturedFirst if self.is_featured => Some(Badge::Featured),
            BadgePolicy::FeaturedFirst if self.is_enhanced => Some(Badge::Premium),
            _ => None,
        }
    }
}

/// Featured entries keyed by name for constant-time membership checks.
///
/// When two entries share a name the first one in file order wins, so its
/// website is the one that overrides.
#[derive(Debug, Clone, Default)]
pub struct FeaturedIndex {
    websites: HashMap<String, Option<String>>,
    mode: NameMatch,
}

impl FeaturedIndex {
    #[must_use]
    pub fn build<'a>(
        featured: impl IntoIterator<Item = &'a FeaturedEntry>,
        mode: NameMatch,
    ) -> Self {
        let mut websites = HashMap::new();
        for entry in featured {
            websites
                .entry(mode.key(&entry.name))
                .or_insert_with(|| entry.website.clone());
        }
        Self { websites, mode }
    }

    #[must_use]
    pub fn mode(&self) -> NameMatch {
        self.mode
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.websites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.websites.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.websites.contains_key(&self.mode.key(name))
    }

    #[must_use]
    pub fn classify(&self, restaurant: &Restaurant) -> Classification {
        let featured_site = self.websites.get(&self.mode.key(&restaurant.name));
        let resolved_website = featured_site
            .and_then(|site| site.as_deref())
            .filter(|site| !site.is_empty())
            .or(restaurant.website.as_deref())
            .map(str::to_string);

        Classification {
            is_featured: featured_site.is_some(),
            is_enhanced: restaurant.enhanced,
            resolved_website,
        }
    }
}

/// One-off classification with exact name matching. Build a
/// [`FeaturedIndex`] instead when classifying a whole collection.
#[must_use]
pub fn classify(restaurant: &Restaurant, featured: &[FeaturedEntry]) -> Classification {
    FeaturedIndex::build(featured, NameMatch::Exact).classify(restaurant)
}
