//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both coordinates are finite and inside their valid ranges
    pub fn is_valid(&self) -> bool {
        crate::validation::validate_coordinates(self.latitude, self.longitude).is_ok()
    }
}

/// Anything that sits at a single location
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

/// Envelope returned by the fetch-and-store endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredBatch<T> {
    pub message: String,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> StoredBatch<T> {
    pub fn new(message: impl Into<String>, data: Vec<T>) -> Self {
        Self {
            message: message.into(),
            count: data.len(),
            data,
        }
    }
}
