//! Human factors models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Human presence attributes at a location
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HumanFactorsSample {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// People per km²
    #[validate(range(min = 0.0))]
    pub population_density: Option<f64>,
    /// Metres to the nearest road
    #[validate(range(min = 0.0))]
    pub road_proximity: Option<f64>,
    #[validate(range(min = 0))]
    pub fire_stations_nearby: Option<i32>,
    /// 0-1 scale
    #[validate(range(min = 0.0, max = 1.0))]
    pub urbanization_index: Option<f64>,
}
