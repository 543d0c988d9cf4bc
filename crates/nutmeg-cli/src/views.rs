//! Command handlers. Each builds its view from the loaded [`Directory`] and
//! hands it to `render`.

use nutmeg_core::{format_categories, AppConfig, Coordinates, TownsFile};
use nutmeg_loader::{DirectoryLoader, FixedPosition, Locator};
use nutmeg_rank::{
    map_center, markers, CategoryFilter, Directory, NameMatch, Radius, RankQuery, SearchOutcome,
    TierOrder,
};
use serde::Serialize;

use crate::render;

/// Load every configured resource into a session directory. Resource
/// failures are logged by the loader and leave gaps, not errors.
///
/// # Errors
///
/// Returns an error only if the data root cannot be used at all.
pub(crate) async fn load_directory(
    config: &AppConfig,
    towns: &TownsFile,
) -> anyhow::Result<Directory> {
    let loader = DirectoryLoader::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build directory loader: {e}"))?;
    let loaded = loader.load(towns).await;

    let name_match = if config.normalize_names {
        NameMatch::Normalized
    } else {
        NameMatch::Exact
    };
    Ok(Directory::new(
        loaded.featured,
        loaded.restaurants,
        loaded.categories,
        name_match,
    )
    .with_town_featured(loaded.town_featured))
}

/// Map user input to the configured town label.
pub(crate) fn resolve_town(towns: &TownsFile, input: &str) -> anyhow::Result<String> {
    towns
        .find(input)
        .map(|source| source.town.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("unknown town '{input}'; run `nutmeg categories` to list towns")
        })
}

#[derive(Debug, Default)]
pub(crate) struct SearchFilters<'a> {
    pub text: Option<&'a str>,
    pub category: Option<&'a str>,
    pub tab: Option<&'a str>,
    pub town: Option<&'a str>,
}

/// Plain text goes through the home search. Any other filter runs the
/// pipeline directly, and the "All" tab lifts premium listings only.
pub(crate) fn search_outcome(directory: &Directory, filters: &SearchFilters<'_>) -> SearchOutcome {
    if filters.category.is_none() && filters.tab.is_none() && filters.town.is_none() {
        return directory.search(filters.text.unwrap_or_default());
    }

    let mut query = RankQuery::default();
    if let Some(text) = filters.text {
        query = query.with_text(text);
    }
    if let Some(category) = filters.category {
        query = query.with_category(CategoryFilter::Contains(category.to_string()));
    }
    if let Some(tab) = filters.tab {
        query = match CategoryFilter::tab(tab) {
            Some(filter) => query.with_category(filter),
            None => query.with_tier_order(TierOrder::PremiumOnly),
        };
    }
    if let Some(town) = filters.town {
        query = query.with_town(town);
    }

    SearchOutcome {
        results: directory.rank(&query),
        is_search: true,
    }
}

pub(crate) fn run_search(
    directory: &Directory,
    filters: &SearchFilters<'_>,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = search_outcome(directory, filters);
    if json {
        return render::print_json(&outcome);
    }
    match outcome.empty_state() {
        Some(state) => render::print_empty(state),
        None => render::print_cards(&outcome.results),
    }
    Ok(())
}

/// Pick the radius: an explicit flag wins over configuration.
pub(crate) fn near_radius(flag: Option<f64>, config: &AppConfig) -> anyhow::Result<Radius> {
    match flag.or(config.near_me_radius_miles) {
        None => Ok(Radius::Unbounded),
        Some(miles) if miles.is_finite() && miles > 0.0 => Ok(Radius::Within(miles)),
        Some(miles) => anyhow::bail!("radius must be a positive number of miles, got {miles}"),
    }
}

pub(crate) async fn run_near(
    directory: &Directory,
    config: &AppConfig,
    lat: f64,
    lng: f64,
    radius: Option<f64>,
    json: bool,
) -> anyhow::Result<()> {
    let radius = near_radius(radius, config)?;
    let position = Coordinates::new(lat, lng)
        .ok_or_else(|| anyhow::anyhow!("invalid position {lat},{lng}"))?;

    let locator = Locator::from_config(FixedPosition(position), config);
    let here = match locator.locate().await {
        Ok(here) => here,
        Err(e) => {
            tracing::warn!(error = %e, "geolocation failed");
            eprintln!("{e}");
            eprintln!("Browse by town instead: `nutmeg town <TOWN>`");
            return Ok(());
        }
    };

    let near = directory.near_me(here, radius);
    if json {
        return render::print_json(&near);
    }

    if !near.featured.is_empty() {
        println!("Featured nearby");
        println!();
        render::print_cards(&near.featured.items);
        if near.featured.hidden() > 0 {
            println!();
            println!("({} more featured)", near.featured.hidden());
        }
        println!();
        println!("---");
        println!();
    }
    match near.empty_state() {
        Some(state) => render::print_empty(state),
        None => render::print_cards(&near.all),
    }
    Ok(())
}

pub(crate) fn run_town(directory: &Directory, town: &str, json: bool) -> anyhow::Result<()> {
    let view = directory.town_view(town);
    if json {
        return render::print_json(&view);
    }

    println!("# {town}");
    println!();
    if !view.featured.is_empty() {
        render::print_cards(&view.featured);
        println!();
        println!("---");
        println!();
    }
    if view.restaurants.is_empty() {
        println!("no restaurants loaded for {town}");
    } else {
        render::print_cards(&view.restaurants);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct MarkerSet {
    center: Coordinates,
    markers: Vec<nutmeg_rank::MapMarker>,
}

pub(crate) fn run_markers(
    directory: &Directory,
    town: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let mut query = RankQuery::default();
    if let Some(town) = town {
        query = query.with_town(town);
    }
    let markers = markers(&directory.rank(&query));
    let set = MarkerSet {
        center: map_center(&markers),
        markers,
    };
    if json {
        return render::print_json(&set);
    }

    println!("center {:.4},{:.4}", set.center.lat, set.center.lng);
    let header = format!("{:<32}{:<14}{:<10}{:<22}CATEGORY", "NAME", "TOWN", "TIER", "POSITION");
    println!("{header}");
    for m in &set.markers {
        let position = format!("{:.4},{:.4}", m.lat, m.lng);
        println!(
            "{:<32}{:<14}{:<10}{:<22}{}",
            m.name,
            m.town,
            m.tier.to_string(),
            position,
            format_categories(&m.categories)
        );
    }
    Ok(())
}

pub(crate) fn run_categories(directory: &Directory) {
    if directory.categories().is_empty() {
        println!("no towns loaded");
        return;
    }
    for town in directory.categories() {
        if town.categories.is_empty() {
            println!("{}: (none)", town.town);
        } else {
            println!("{}: {}", town.town, town.categories.join(", "));
        }
    }
}
