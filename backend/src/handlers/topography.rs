//! HTTP handlers for terrain endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use shared::types::GeoPoint;

use crate::error::AppResult;
use crate::external::TerrainClient;
use crate::handlers::{point_or_default, require_valid_point};
use crate::services::topography::{TopographyResponse, TopographyService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TopographyParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Sample terrain elevation at a point and store it
pub async fn fetch_topography(
    State(state): State<AppState>,
    Query(params): Query<TopographyParams>,
) -> AppResult<Json<TopographyResponse>> {
    let mapbox = &state.config.mapbox;
    let default = GeoPoint::new(mapbox.default_latitude, mapbox.default_longitude);
    let point = require_valid_point(point_or_default(
        params.lat.as_deref(),
        params.lon.as_deref(),
        default,
    ))?;

    let client = TerrainClient::new(state.http.clone(), mapbox);
    let service = TopographyService::with_client(state.db, client);
    let response = service.sample_and_store(point).await?;
    Ok(Json(response))
}
