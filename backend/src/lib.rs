//! Ignis wildfire data backend
//!
//! Pulls fire hotspots, forecasts and terrain from public providers, stores
//! them in PostgreSQL and serves them to the wildfire map. Also proxies the
//! external fire-spread predictor.

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod db;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use services::SpreadPredictor;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    /// Upstream HTTP client, shared so connections are pooled
    pub http: reqwest::Client,
    pub predictor: Arc<dyn SpreadPredictor>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// CORS configuration; `*` allows any origin
fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return cors.allow_origin(Any);
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => cors.allow_origin(value),
        Err(_) => {
            tracing::warn!("Invalid CORS origin {:?}; cross-origin requests disabled", origin);
            cors
        }
    }
}
