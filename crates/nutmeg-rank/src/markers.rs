//! Map boundary: plain marker values, map centering, directions links.

use nutmeg_core::Coordinates;
use serde::Serialize;

use crate::pipeline::RankedResult;
use crate::tier::Tier;

/// Fallback map center, roughly mid-shoreline off Guilford.
pub const SHORELINE_CENTER: Coordinates = Coordinates {
    lat: 41.28,
    lng: -72.62,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub categories: Vec<String>,
    pub town: String,
    pub tier: Tier,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Markers for every result that can be placed, in result order.
#[must_use]
pub fn markers(results: &[RankedResult]) -> Vec<MapMarker> {
    results
        .iter()
        .filter_map(|r| {
            let at = r.restaurant.coordinates?;
            Some(MapMarker {
                name: r.restaurant.name.clone(),
                lat: at.lat,
                lng: at.lng,
                categories: r.restaurant.categories.clone(),
                town: r.restaurant.town.clone(),
                tier: r.tier,
                website: r.resolved_website.clone(),
                phone: r.restaurant.phone.clone(),
                address: r.restaurant.address.clone(),
            })
        })
        .collect()
}

/// Mean of the marker positions, or [`SHORELINE_CENTER`] with no markers.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn map_center(markers: &[MapMarker]) -> Coordinates {
    if markers.is_empty() {
        return SHORELINE_CENTER;
    }
    let n = markers.len() as f64;
    let (lat, lng) = markers
        .iter()
        .fold((0.0, 0.0), |(lat, lng), m| (lat + m.lat, lng + m.lng));
    Coordinates {
        lat: lat / n,
        lng: lng / n,
    }
}

/// Google Maps driving directions to `to`.
#[must_use]
pub fn directions_url(to: Coordinates) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        to.lat, to.lng
    )
}
