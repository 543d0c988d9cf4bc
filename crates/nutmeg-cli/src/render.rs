//! Plain-text and JSON output. Results go to stdout; logs stay on stderr.

use nutmeg_core::format_categories;
use nutmeg_rank::{directions_url, format_distance, EmptyState, RankedResult};
use serde::Serialize;

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn print_empty(state: EmptyState) {
    println!("{}", state.headline());
    println!("{}", state.message());
}

/// One card per result, separated by blank lines.
pub(crate) fn print_cards(results: &[RankedResult]) {
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for line in card_lines(result) {
            println!("{line}");
        }
    }
}

/// Title line, then whichever details the listing has. The phone only
/// shows for featured and premium listings.
pub(crate) fn card_lines(result: &RankedResult) -> Vec<String> {
    let r = &result.restaurant;

    let mut title = match result.badge {
        Some(badge) => format!("[{}] {}", badge.label(), r.name),
        None => r.name.clone(),
    };
    if !r.town.is_empty() {
        title.push_str(&format!(" ({})", r.town));
    }
    if let Some(miles) = result.distance_miles {
        title.push_str(&format!(" - {}", format_distance(miles)));
    }

    let mut lines = vec![title];
    if !r.categories.is_empty() {
        lines.push(format!("    {}", format_categories(&r.categories)));
    }
    if let Some(address) = &r.address {
        lines.push(format!("    {address}"));
    }
    if result.phone_visible() {
        if let Some(phone) = &r.phone {
            lines.push(format!("    {phone}"));
        }
    }
    if let Some(website) = &result.resolved_website {
        lines.push(format!("    {website}"));
    }
    if let (Some(_), Some(at)) = (result.distance_miles, r.coordinates) {
        lines.push(format!("    directions: {}", directions_url(at)));
    }
    lines
}
