//! HTTP handlers for weather endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use shared::types::{GeoPoint, StoredBatch};

use crate::error::AppResult;
use crate::external::NoaaClient;
use crate::handlers::{point_or_default, require_valid_point};
use crate::services::weather::{WeatherRecord, WeatherService};
use crate::AppState;

/// Optional location; unparseable values fall back to the configured point
#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Fetch the NOAA forecast for a point and store every period
pub async fn fetch_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> AppResult<Json<StoredBatch<WeatherRecord>>> {
    let noaa = &state.config.noaa;
    let default = GeoPoint::new(noaa.default_latitude, noaa.default_longitude);
    let point = require_valid_point(point_or_default(
        params.lat.as_deref(),
        params.lon.as_deref(),
        default,
    ))?;

    let client = NoaaClient::new(state.http.clone(), noaa);
    let service = WeatherService::with_client(state.db, client);
    let batch = service.fetch_and_store(point).await?;
    Ok(Json(batch))
}
