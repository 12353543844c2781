//! Route definitions for the Ignis backend

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // FIRMS hotspots
        .route("/wildfires", get(handlers::fetch_wildfires))
        .route("/wildfires/nearby", get(handlers::nearby_wildfires))
        // NOAA forecast
        .route("/weather", get(handlers::fetch_weather))
        // Terrain
        .route("/topography", get(handlers::fetch_topography))
        // Human factors
        .route(
            "/human-factors",
            get(handlers::fetch_human_factors).post(handlers::store_human_factors),
        )
        .route("/historical-wildfires", post(handlers::store_historical_wildfires))
        // Prediction
        .route("/predict-fire-spread", post(handlers::predict_fire_spread))
}
