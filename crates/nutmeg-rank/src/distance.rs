//! Great-circle distance.

use nutmeg_core::Coordinates;

/// Mean Earth radius used for every distance in the directory.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine distance in miles between two points given in decimal degrees.
#[must_use]
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1] for antipodal points.
    let a = a.clamp(0.0, 1.0);
    EARTH_RADIUS_MILES * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

#[must_use]
pub fn distance_between(from: Coordinates, to: Coordinates) -> f64 {
    distance_miles(from.lat, from.lng, to.lat, to.lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        assert!(distance_miles(41.2834, -72.6815, 41.2834, -72.6815).abs() < 1e-12);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = distance_miles(41.2795, -72.8151, 41.2940, -72.3762);
        let back = distance_miles(41.2940, -72.3762, 41.2795, -72.8151);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn one_degree_latitude_at_equator_is_about_69_miles() {
        let d = distance_miles(0.0, 0.0, 1.0, 0.0);
        assert!((d - 69.0).abs() / 69.0 < 0.01, "got {d}");
    }

    #[test]
    fn branford_to_old_saybrook_is_plausible() {
        // Town greens, roughly 23 miles apart along the shore.
        let d = distance_miles(41.2795, -72.8151, 41.2918, -72.3762);
        assert!(d > 20.0 && d < 26.0, "got {d}");
    }

    #[test]
    fn antipodal_points_do_not_produce_nan() {
        let d = distance_miles(0.0, 0.0, 0.0, 180.0);
        assert!(d.is_finite());
        assert!((d - EARTH_RADIUS_MILES * std::f64::consts::PI).abs() < 1.0);
    }

    #[test]
    fn distance_between_matches_raw_form() {
        let a = Coordinates {
            lat: 41.28,
            lng: -72.68,
        };
        let b = Coordinates {
            lat: 41.27,
            lng: -72.53,
        };
        let raw = distance_miles(a.lat, a.lng, b.lat, b.lng);
        assert!((distance_between(a, b) - raw).abs() < f64::EPSILON);
    }
}
