//! Session context over one loaded directory.

use nutmeg_core::{Coordinates, FeaturedEntry, Restaurant, TownCategories};
use serde::Serialize;

use crate::pipeline::{
    decorate, rank, EmptyState, Radius, RankQuery, RankedResult, Shelf, NEAR_ME_SHELF_LEN,
};
use crate::tier::{BadgePolicy, Classification, FeaturedIndex, NameMatch};

/// The collections loaded for one session, plus a name index over the
/// featured list.
///
/// Town files may carry their own featured shelf. Those entries only count
/// for their own town, where they are consulted before the global list.
///
/// Built once after loading and only read afterwards. `Directory::default()`
/// stands in for a session whose load has not finished: every query sees
/// empty collections.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    featured: Vec<FeaturedEntry>,
    town_featured: Vec<FeaturedEntry>,
    restaurants: Vec<Restaurant>,
    categories: Vec<TownCategories>,
    index: FeaturedIndex,
}

/// Home-page search results.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<RankedResult>,
    /// False when the text was blank and the featured list was returned.
    pub is_search: bool,
}

impl SearchOutcome {
    #[must_use]
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.results.is_empty() {
            None
        } else if self.is_search {
            Some(EmptyState::NoMatches)
        } else {
            Some(EmptyState::NoData)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NearMe {
    pub featured: Shelf,
    pub all: Vec<RankedResult>,
}

impl NearMe {
    #[must_use]
    pub fn empty_state(&self) -> Option<EmptyState> {
        self.all.is_empty().then_some(EmptyState::NoLocationData)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TownView {
    pub town: String,
    pub featured: Vec<RankedResult>,
    pub restaurants: Vec<RankedResult>,
}

impl Directory {
    #[must_use]
    pub fn new(
        featured: Vec<FeaturedEntry>,
        restaurants: Vec<Restaurant>,
        categories: Vec<TownCategories>,
        name_match: NameMatch,
    ) -> Self {
        let index = FeaturedIndex::build(&featured, name_match);
        Self {
            featured,
            town_featured: Vec::new(),
            restaurants,
            categories,
            index,
        }
    }

    /// Attach the featured shelves read from town files. Entries without a
    /// town are ignored.
    #[must_use]
    pub fn with_town_featured(mut self, town_featured: Vec<FeaturedEntry>) -> Self {
        self.town_featured = town_featured;
        self
    }

    #[must_use]
    pub fn featured(&self) -> &[FeaturedEntry] {
        &self.featured
    }

    /// Featured entries a town file lists for `town`.
    pub fn town_featured(&self, town: &str) -> impl Iterator<Item = &FeaturedEntry> {
        let town = town.to_string();
        self.town_featured
            .iter()
            .filter(move |entry| entry.town.as_deref() == Some(town.as_str()))
    }

    #[must_use]
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    #[must_use]
    pub fn categories(&self) -> &[TownCategories] {
        &self.categories
    }

    /// A town's category vocabulary, empty for unknown towns.
    #[must_use]
    pub fn categories_for(&self, town: &str) -> &[String] {
        self.categories
            .iter()
            .find(|c| c.town == town)
            .map(|c| c.categories.as_slice())
            .unwrap_or_default()
    }

    /// Town labels in configured order.
    pub fn towns(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.town.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.featured.is_empty() && self.town_featured.is_empty() && self.restaurants.is_empty()
    }

    #[must_use]
    pub fn classify(&self, restaurant: &Restaurant) -> Classification {
        self.index.classify(restaurant)
    }

    /// Rank every loaded restaurant. A town-scoped query classifies against
    /// that town's own shelf as well as the global list.
    #[must_use]
    pub fn rank(&self, query: &RankQuery) -> Vec<RankedResult> {
        match query.town.as_deref().and_then(|town| self.town_index(town)) {
            Some(index) => rank(&self.restaurants, &index, query),
            None => rank(&self.restaurants, &self.index, query),
        }
    }

    /// Index over `town`'s own shelf followed by the global list, so a
    /// town-local entry's website wins. `None` when the town file listed
    /// no featured entries.
    fn town_index(&self, town: &str) -> Option<FeaturedIndex> {
        let mut local = self.town_featured(town).peekable();
        local.peek()?;
        Some(FeaturedIndex::build(
            local.chain(&self.featured),
            self.index.mode(),
        ))
    }

    /// Home search. Blank text shows the featured list in file order;
    /// anything else searches every town.
    #[must_use]
    pub fn search(&self, text: &str) -> SearchOutcome {
        if text.trim().is_empty() {
            let results = self
                .featured
                .iter()
                .map(|entry| {
                    decorate(
                        &entry.to_restaurant(),
                        &self.index,
                        None,
                        BadgePolicy::default(),
                    )
                })
                .collect();
            return SearchOutcome {
                results,
                is_search: false,
            };
        }

        SearchOutcome {
            results: self.rank(&RankQuery::default().with_text(text)),
            is_search: true,
        }
    }

    /// Nearest featured entries for the shelf, and every placed restaurant by
    /// distance.
    #[must_use]
    pub fn near_me(&self, location: Coordinates, radius: Radius) -> NearMe {
        let query = RankQuery::default().with_location(location, radius);
        let featured: Vec<Restaurant> = self
            .featured
            .iter()
            .map(FeaturedEntry::to_restaurant)
            .collect();

        NearMe {
            featured: Shelf::top(rank(&featured, &self.index, &query), NEAR_ME_SHELF_LEN),
            all: self.rank(&query),
        }
    }

    /// One town's page: its featured shelf, then its restaurants featured
    /// first, premium next, then by name.
    ///
    /// The shelf lists the town file's own entries in file order, followed by
    /// global entries for the town that the town file did not already name.
    #[must_use]
    pub fn town_view(&self, town: &str) -> TownView {
        let index = self.town_index(town);
        let index = index.as_ref().unwrap_or(&self.index);
        let local = FeaturedIndex::build(self.town_featured(town), self.index.mode());

        let featured = self
            .town_featured(town)
            .chain(
                self.featured
                    .iter()
                    .filter(|entry| entry.town.as_deref() == Some(town))
                    .filter(|entry| !local.contains(&entry.name)),
            )
            .map(|entry| decorate(&entry.to_restaurant(), index, None, BadgePolicy::default()))
            .collect();

        TownView {
            town: town.to_string(),
            featured,
            restaurants: self.rank(&RankQuery::default().with_town(town)),
        }
    }
}
