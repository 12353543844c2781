//! Health check handlers
//!
//! `/health` reports the database schema state and which upstream feeds
//! this instance is configured against.

use axum::{extract::State, Json};
use serde::Serialize;
use sqlx::PgPool;

use crate::config::Config;
use crate::AppState;

/// Banner served at `/`
pub const BANNER: &str = "Ignis AI Backend is running";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `healthy` when the database answers, `degraded` otherwise
    pub status: String,
    pub version: String,
    pub database: DatabaseHealth,
    pub providers: ProviderSummary,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub state: String,
    /// Latest applied migration, if any
    pub schema_version: Option<i64>,
    pub stored_wildfires: Option<i64>,
}

impl DatabaseHealth {
    fn disconnected() -> Self {
        Self {
            state: "disconnected".to_string(),
            schema_version: None,
            stored_wildfires: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state == "connected"
    }
}

/// Configured upstream feeds and the predictor
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSummary {
    pub firms_source: String,
    pub firms_day_range: u8,
    pub predictor_command: String,
    pub predictor_slots: usize,
}

impl ProviderSummary {
    pub fn from_config(config: &Config) -> Self {
        Self {
            firms_source: config.firms.source.clone(),
            firms_day_range: config.firms.day_range,
            predictor_command: config.predictor.command.clone(),
            predictor_slots: config.predictor.max_concurrent,
        }
    }
}

/// Root endpoint
pub async fn root() -> &'static str {
    BANNER
}

async fn database_health(db: &PgPool) -> DatabaseHealth {
    if let Err(e) = sqlx::query("SELECT 1").execute(db).await {
        tracing::warn!("Health check could not reach the database: {}", e);
        return DatabaseHealth::disconnected();
    }

    // Either table may be missing when migrations are disabled
    let schema_version =
        sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(version) FROM _sqlx_migrations")
            .fetch_one(db)
            .await
            .ok()
            .flatten();
    let stored_wildfires = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM wildfires")
        .fetch_one(db)
        .await
        .ok();

    DatabaseHealth {
        state: "connected".to_string(),
        schema_version,
        stored_wildfires,
    }
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = database_health(&state.db).await;
    let status = if database.is_connected() {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        providers: ProviderSummary::from_config(&state.config),
    })
}
