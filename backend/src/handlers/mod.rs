//! HTTP handlers

pub mod health;
pub mod historical;
pub mod human_factors;
pub mod prediction;
pub mod topography;
pub mod weather;
pub mod wildfire;

pub use health::*;
pub use historical::*;
pub use human_factors::*;
pub use prediction::*;
pub use topography::*;
pub use weather::*;
pub use wildfire::*;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use shared::types::GeoPoint;
use validator::Validate;

use crate::error::AppError;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Parse an optional coordinate, treating absent or unparseable input as missing
fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Point from optional `lat`/`lon` strings, each falling back to the default
pub(crate) fn point_or_default(lat: Option<&str>, lon: Option<&str>, default: GeoPoint) -> GeoPoint {
    GeoPoint::new(
        parse_coordinate(lat).unwrap_or(default.latitude),
        parse_coordinate(lon).unwrap_or(default.longitude),
    )
}

/// Reject a point outside the valid coordinate ranges
pub(crate) fn require_valid_point(point: GeoPoint) -> Result<GeoPoint, AppError> {
    shared::validation::validate_coordinates(point.latitude, point.longitude)
        .map(|_| point)
        .map_err(|e| AppError::Validation(e.to_string()))
}

/// Validate every record of a bulk payload, naming the first bad one
pub(crate) fn validate_all<T: Validate>(records: &[T]) -> Result<(), AppError> {
    for (index, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|e| AppError::Validation(format!("record {}: {}", index, e)))?;
    }
    Ok(())
}
