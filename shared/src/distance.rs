//! Great-circle distance and radius filtering
//!
//! Detections come from one provider query at a time (hundreds of rows), so
//! filtering is a straight scan.

use crate::types::{GeoPoint, Located};

/// Mean Earth radius in miles
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine distance between two points, in miles
pub fn haversine_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    EARTH_RADIUS_MILES * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Keep the items within `radius_miles` of `center`, each paired with its
/// distance. A radius that is not strictly positive matches nothing.
pub fn within_radius<'a, T: Located>(
    items: &'a [T],
    center: GeoPoint,
    radius_miles: f64,
) -> Vec<(&'a T, f64)> {
    if radius_miles.is_nan() || radius_miles <= 0.0 {
        return Vec::new();
    }
    items
        .iter()
        .map(|item| (item, haversine_miles(center, item.location())))
        .filter(|(_, distance)| *distance <= radius_miles)
        .collect()
}
