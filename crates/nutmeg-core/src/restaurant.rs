use serde::{Deserialize, Serialize};

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Build a coordinate pair, rejecting NaN and infinities.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        (lat.is_finite() && lng.is_finite()).then_some(Self { lat, lng })
    }

    /// Both halves must be present for a listing to be placeable.
    #[must_use]
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Self::new(lat, lng),
            _ => None,
        }
    }
}

/// A listing loaded from a town file, stamped with the town it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub town: String,
    pub categories: Vec<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Logo URL.
    pub image: Option<String>,
    /// Logo needs a dark backdrop. Rendering hint only.
    #[serde(default)]
    pub dark_bg: bool,
    pub coordinates: Option<Coordinates>,
    /// Premium (paid, second tier) listing.
    #[serde(default)]
    pub enhanced: bool,
}

/// A record from the curated featured list.
///
/// Its `website` is authoritative over the same-named town listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedEntry {
    pub name: String,
    pub town: Option<String>,
    pub categories: Vec<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub dark_bg: bool,
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub enhanced: bool,
}

/// A town's cuisine vocabulary, in file order, for category-tab consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownCategories {
    pub town: String,
    pub categories: Vec<String>,
}

impl FeaturedEntry {
    /// View this entry as a regular listing. Entries without a town get an
    /// empty town label.
    #[must_use]
    pub fn to_restaurant(&self) -> Restaurant {
        Restaurant {
            name: self.name.clone(),
            town: self.town.clone().unwrap_or_default(),
            categories: self.categories.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            image: self.image.clone(),
            dark_bg: self.dark_bg,
            coordinates: self.coordinates,
            enhanced: self.enhanced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_reject_non_finite() {
        assert!(Coordinates::new(f64::NAN, -72.6).is_none());
        assert!(Coordinates::new(41.3, f64::INFINITY).is_none());
        assert!(Coordinates::new(41.3, -72.6).is_some());
    }

    #[test]
    fn coordinates_need_both_parts() {
        assert!(Coordinates::from_parts(Some(41.3), None).is_none());
        assert!(Coordinates::from_parts(None, Some(-72.6)).is_none());
        assert_eq!(
            Coordinates::from_parts(Some(41.3), Some(-72.6)),
            Some(Coordinates {
                lat: 41.3,
                lng: -72.6
            })
        );
    }

    #[test]
    fn featured_entry_without_town_maps_to_empty_town() {
        let entry = FeaturedEntry {
            name: "Cafe X".to_string(),
            town: None,
            categories: vec!["Cafe".to_string()],
            address: None,
            phone: Some("203-555-0100".to_string()),
            website: Some("https://x.com".to_string()),
            image: None,
            dark_bg: false,
            coordinates: None,
            enhanced: false,
        };
        let restaurant = entry.to_restaurant();
        assert_eq!(restaurant.name, "Cafe X");
        assert_eq!(restaurant.town, "");
        assert_eq!(restaurant.website.as_deref(), Some("https://x.com"));
    }

    #[test]
    fn restaurant_serializes_round_trip_through_json() {
        let restaurant = Restaurant {
            name: "Lobster Landing".to_string(),
            town: "Clinton".to_string(),
            categories: vec!["Seafood".to_string()],
            address: Some("152 Commerce St".to_string()),
            phone: None,
            website: None,
            image: None,
            dark_bg: true,
            coordinates: Coordinates::new(41.27, -72.53),
            enhanced: true,
        };
        let json = serde_json::to_string(&restaurant).unwrap();
        let back: Restaurant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, restaurant);
    }
}
