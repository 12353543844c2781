//! Weather data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text stored when the provider omits a short forecast
pub const DEFAULT_FORECAST: &str = "No forecast available";

/// One forecast period for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObservation {
    pub latitude: f64,
    pub longitude: f64,
    /// Degrees, in the unit the provider reports
    pub temperature: f64,
    /// Relative humidity percent
    pub humidity: Option<f64>,
    /// Numeric part of the provider's wind speed string
    pub wind_speed: Option<f64>,
    /// Probability of precipitation percent
    pub precipitation: f64,
    pub forecast: String,
    pub timestamp: DateTime<Utc>,
}
