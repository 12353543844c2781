//! Terrain models

use serde::{Deserialize, Serialize};

use crate::tile::terrain_rgb_elevation;
use crate::types::GeoPoint;

/// Vegetation label stored until a land-cover source is wired in
pub const UNKNOWN_VEGETATION: &str = "Unknown";

/// Elevation/slope sample at a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopographySample {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres above sea level
    pub elevation: f64,
    /// Degrees. Placeholder value, not derived from the terrain tile.
    pub slope: f64,
    pub vegetation_type: String,
}

impl TopographySample {
    /// Build a sample from one decoded terrain-RGB pixel
    pub fn from_terrain_pixel(point: GeoPoint, rgb: [u8; 3], slope: f64) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
            elevation: terrain_rgb_elevation(rgb[0], rgb[1], rgb[2]),
            slope,
            vegetation_type: UNKNOWN_VEGETATION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_terrain_pixel() {
        let sample = TopographySample::from_terrain_pixel(GeoPoint::new(34.0, -118.0), [1, 134, 160], 12.5);
        assert!(sample.elevation.abs() < 1e-6);
        assert_eq!(sample.slope, 12.5);
        assert_eq!(sample.vegetation_type, "Unknown");
        assert_eq!(sample.latitude, 34.0);
    }
}
