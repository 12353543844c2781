//! Web-Mercator tile indexing and terrain-RGB decoding

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::types::GeoPoint;

/// Latitude limit of the square Web-Mercator projection
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

/// Zoom level used for elevation lookups
pub const TERRAIN_ZOOM: u8 = 14;

/// Slippy-map tile address
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TileIndex {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl TileIndex {
    /// The tile containing `point` at `zoom`, or `None` if the point is not
    /// representable in Web-Mercator.
    pub fn containing(point: GeoPoint, zoom: u8) -> Option<Self> {
        if !point.is_valid() || point.latitude.abs() > MAX_MERCATOR_LATITUDE || zoom > 30 {
            return None;
        }
        let n = f64::from(1u32 << zoom);
        let lat_rad = point.latitude.to_radians();

        let x = ((point.longitude + 180.0) / 360.0 * n).floor();
        let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n).floor();

        // lon = 180 and lat = -MAX land exactly on the far edge
        let max = n - 1.0;
        Some(Self {
            zoom,
            x: x.clamp(0.0, max) as u32,
            y: y.clamp(0.0, max) as u32,
        })
    }
}

/// Decode a Mapbox terrain-RGB pixel to metres above sea level
pub fn terrain_rgb_elevation(r: u8, g: u8, b: u8) -> f64 {
    let encoded = u32::from(r) * 65_536 + u32::from(g) * 256 + u32::from(b);
    f64::from(encoded) * 0.1 - 10_000.0
}
