//! Presentation of distances.

pub const FEET_PER_MILE: f64 = 5280.0;

/// Human-readable distance: feet under 0.1 mi, one decimal under 10 mi,
/// whole miles beyond.
///
/// ```
/// use nutmeg_rank::format_distance;
/// assert_eq!(format_distance(0.05), "264 ft");
/// assert_eq!(format_distance(3.42), "3.4 mi");
/// assert_eq!(format_distance(12.6), "13 mi");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_distance(miles: f64) -> String {
    let miles = if miles.is_finite() { miles.max(0.0) } else { 0.0 };
    if miles < 0.1 {
        let feet = (miles * FEET_PER_MILE).round() as u64;
        format!("{feet} ft")
    } else if miles < 10.0 {
        format!("{miles:.1} mi")
    } else {
        format!("{} mi", miles.round() as u64)
    }
}
