//! HTTP handlers for wildfire endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use shared::classify::{ConfidenceBucket, SeverityCategory};
use shared::models::{FireFilter, NearbyFire};
use shared::types::{GeoPoint, StoredBatch};

use crate::error::{AppError, AppResult};
use crate::external::FirmsClient;
use crate::services::wildfire::{NearbyQuery, WildfireRecord, WildfireService};
use crate::AppState;

/// Default look-back window for nearby queries
pub const DEFAULT_NEARBY_HOURS: u32 = 48;

/// Longest accepted look-back window, one year
pub const MAX_NEARBY_HOURS: u32 = 24 * 365;

/// Fetch the latest FIRMS hotspots and store them
pub async fn fetch_wildfires(
    State(state): State<AppState>,
) -> AppResult<Json<StoredBatch<WildfireRecord>>> {
    let client = FirmsClient::new(state.http.clone(), &state.config.firms);
    let service = WildfireService::with_client(state.db, client);
    let batch = service.fetch_and_store().await?;
    Ok(Json(batch))
}

/// Query parameters for nearby detections
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub lat: f64,
    pub lng: f64,
    /// Miles
    pub radius: f64,
    pub severity: Option<String>,
    pub confidence: Option<String>,
    pub hours: Option<u32>,
}

impl NearbyParams {
    fn into_query(self) -> AppResult<NearbyQuery> {
        let center = GeoPoint::new(self.lat, self.lng);
        if !center.is_valid() {
            return Err(AppError::Validation("lat/lng out of range".to_string()));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(AppError::Validation("radius must be a positive number of miles".to_string()));
        }

        let severity = non_empty(self.severity)
            .map(|s| s.parse::<SeverityCategory>())
            .transpose()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let confidence = non_empty(self.confidence)
            .map(|s| s.parse::<ConfidenceBucket>())
            .transpose()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let hours = self.hours.unwrap_or(DEFAULT_NEARBY_HOURS);
        if hours == 0 {
            return Err(AppError::Validation("hours must be at least 1".to_string()));
        }
        if hours > MAX_NEARBY_HOURS {
            return Err(AppError::Validation(format!(
                "hours must be at most {}",
                MAX_NEARBY_HOURS
            )));
        }

        Ok(NearbyQuery {
            center,
            radius: self.radius,
            filter: FireFilter {
                severity,
                confidence,
            },
            hours,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Stored detections near a point, nearest first
pub async fn nearby_wildfires(
    State(state): State<AppState>,
    params: Result<Query<NearbyParams>, QueryRejection>,
) -> AppResult<Json<Vec<NearbyFire>>> {
    let Query(params) = params?;
    let query = params.into_query()?;

    let service = WildfireService::new(state.db);
    let fires = service.nearby(query).await?;
    Ok(Json(fires))
}
