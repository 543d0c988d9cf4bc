//! End-to-end ranking behavior over small hand-built directories.

use std::collections::HashSet;

use nutmeg_core::{Coordinates, FeaturedEntry, Restaurant, TownCategories};
use nutmeg_rank::{
    distance_miles, rank, CategoryFilter, Directory, FeaturedIndex, NameMatch, Radius, RankQuery,
    Tier, NEAR_ME_RADIUS_MILES,
};

fn restaurant(name: &str, town: &str) -> Restaurant {
    Restaurant {
        name: name.to_string(),
        town: town.to_string(),
        categories: Vec::new(),
        address: None,
        phone: None,
        website: None,
        image: None,
        dark_bg: false,
        coordinates: None,
        enhanced: false,
    }
}

fn featured(name: &str, website: &str) -> FeaturedEntry {
    FeaturedEntry {
        name: name.to_string(),
        town: None,
        categories: Vec::new(),
        address: None,
        phone: None,
        website: Some(website.to_string()),
        image: None,
        dark_bg: false,
        coordinates: None,
        enhanced: false,
    }
}

/// A point `miles` due north of `from`.
fn north_of(from: Coordinates, miles: f64) -> Coordinates {
    let degrees = miles / 3959.0 * (180.0 / std::f64::consts::PI);
    Coordinates::new(from.lat + degrees, from.lng).unwrap()
}

// ---------------------------------------------------------------------------
// Pipeline properties
// ---------------------------------------------------------------------------

#[test]
fn unfiltered_rank_returns_each_item_once_deterministically() {
    let mut all: Vec<Restaurant> = [
        ("Su Casa", "Branford"),
        ("Lenny's", "Branford"),
        ("Shoreline Diner", "Guilford"),
        ("Lenny's", "Branford"),
        ("Bar Bouchée", "Madison"),
        ("Zhang's", "Madison"),
    ]
    .iter()
    .map(|(n, t)| restaurant(n, t))
    .collect();
    all[2].enhanced = true;
    all[3].address = Some("second copy".to_string());

    let index = FeaturedIndex::default();
    let first = rank(&all, &index, &RankQuery::default());
    let second = rank(&all, &index, &RankQuery::default());

    assert_eq!(first.len(), all.len());
    assert_eq!(first, second);
    // Equal keys keep load order.
    let lennys: Vec<_> = first
        .iter()
        .filter(|r| r.name() == "Lenny's")
        .map(|r| r.restaurant.address.clone())
        .collect();
    assert_eq!(lennys, vec![None, Some("second copy".to_string())]);
    assert_eq!(first[0].name(), "Shoreline Diner");
}

#[test]
fn category_contains_and_exact() {
    let mut pizza = restaurant("Pepe's", "Branford");
    pizza.categories = vec!["Pizza".to_string(), "Italian".to_string()];
    let all = vec![pizza, restaurant("Plain", "Branford")];
    let index = FeaturedIndex::default();

    let contains = rank(
        &all,
        &index,
        &RankQuery::default().with_category(CategoryFilter::Contains("pizza".to_string())),
    );
    assert_eq!(contains.len(), 1);

    let exact = rank(
        &all,
        &index,
        &RankQuery::default().with_category(CategoryFilter::Exact("Italian".to_string())),
    );
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].name(), "Pepe's");
}

#[test]
fn featured_by_name_takes_featured_website() {
    let mut listing = restaurant("Cafe X", "Guilford");
    listing.website = Some("https://old.com".to_string());
    let index = FeaturedIndex::build(&[featured("Cafe X", "https://x.com")], NameMatch::Exact);

    let ranked = rank(&[listing], &index, &RankQuery::default());
    assert!(ranked[0].is_featured);
    assert_eq!(ranked[0].tier, Tier::Featured);
    assert_eq!(ranked[0].resolved_website.as_deref(), Some("https://x.com"));
}

#[test]
fn near_me_radius_boundary() {
    let here = Coordinates::new(41.2795, -72.8151).unwrap();
    let mut inside = restaurant("Inside", "Branford");
    inside.coordinates = Some(north_of(here, 4.9));
    let mut outside = restaurant("Outside", "Branford");
    outside.coordinates = Some(north_of(here, 5.1));

    let at = outside.coordinates.unwrap();
    let d = distance_miles(here.lat, here.lng, at.lat, at.lng);
    assert!((d - 5.1).abs() < 1e-6, "got {d}");

    let ranked = rank(
        &[outside, inside],
        &FeaturedIndex::default(),
        &RankQuery::default().with_location(here, Radius::Within(NEAR_ME_RADIUS_MILES)),
    );
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].name(), "Inside");
    let miles = ranked[0].distance_miles.unwrap();
    assert!((miles - 4.9).abs() < 1e-6);
}

#[test]
fn nonsense_search_is_empty() {
    let directory = Directory::new(
        Vec::new(),
        vec![restaurant("Su Casa", "Branford")],
        Vec::new(),
        NameMatch::Exact,
    );
    assert!(directory.search("zzznotfound").results.is_empty());
}

// ---------------------------------------------------------------------------
// Session directory
// ---------------------------------------------------------------------------

#[test]
fn featured_cafe_in_guilford() {
    let mut listing = restaurant("Cafe X", "Guilford");
    listing.categories = vec!["Cafe".to_string()];
    listing.website = Some("https://old.com".to_string());
    listing.coordinates = Coordinates::new(41.3, -72.6);

    let directory = Directory::new(
        vec![featured("Cafe X", "https://x.com")],
        vec![listing],
        vec![TownCategories {
            town: "Guilford".to_string(),
            categories: vec!["Cafe".to_string()],
        }],
        NameMatch::Exact,
    );

    let results = directory.rank(&RankQuery::default());
    assert_eq!(results.len(), 1);
    assert!(results[0].is_featured);
    assert_eq!(results[0].resolved_website.as_deref(), Some("https://x.com"));
    assert_eq!(results[0].restaurant.town, "Guilford");
}

#[test]
fn normalized_matching_is_opt_in() {
    let listings = vec![restaurant("cafe x ", "Guilford")];
    let entries = vec![featured("Cafe X", "https://x.com")];

    let exact = Directory::new(entries.clone(), listings.clone(), Vec::new(), NameMatch::Exact);
    assert!(!exact.rank(&RankQuery::default())[0].is_featured);

    let loose = Directory::new(entries, listings, Vec::new(), NameMatch::Normalized);
    assert!(loose.rank(&RankQuery::default())[0].is_featured);
}

#[test]
fn results_serialize_flat() {
    let directory = Directory::new(
        vec![featured("Cafe X", "https://x.com")],
        vec![restaurant("Cafe X", "Guilford")],
        Vec::new(),
        NameMatch::Exact,
    );
    let value = serde_json::to_value(directory.rank(&RankQuery::default())).unwrap();
    let first = &value[0];
    assert_eq!(first["name"], "Cafe X");
    assert_eq!(first["town"], "Guilford");
    assert_eq!(first["tier"], "featured");
    assert_eq!(first["badge"], "featured");
    assert_eq!(first["resolved_website"], "https://x.com");

    let names: HashSet<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names.len(), 1);
}
