//! Historical wildfire models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A past fire, used as training/context data
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalWildfireRecord {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// Acres burned
    #[validate(range(min = 0.0))]
    pub fire_size: f64,
    /// Human, Lightning, Unknown
    #[validate(length(max = 64))]
    pub cause: Option<String>,
    /// Days
    #[validate(range(min = 0.0))]
    pub duration: Option<f64>,
    #[validate(range(min = 1800, max = 2100))]
    pub year: i32,
}
