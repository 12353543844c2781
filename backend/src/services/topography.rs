//! Terrain sampling

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::TopographySample;
use shared::tile::{TileIndex, TERRAIN_ZOOM};
use shared::types::GeoPoint;

use crate::error::{AppError, AppResult};
use crate::external::TerrainClient;

/// Upper bound (exclusive) of the placeholder slope, degrees
pub const MAX_PLACEHOLDER_SLOPE: f64 = 45.0;

/// Topography service
#[derive(Clone)]
pub struct TopographyService {
    db: PgPool,
    terrain: Option<TerrainClient>,
}

/// Stored terrain sample
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TopographyRecord {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub slope: f64,
    pub vegetation_type: String,
    pub created_at: DateTime<Utc>,
}

/// Response body for `GET /api/topography`
#[derive(Debug, Serialize)]
pub struct TopographyResponse {
    pub message: String,
    pub data: TopographyRecord,
}

impl TopographyService {
    pub fn new(db: PgPool) -> Self {
        Self { db, terrain: None }
    }

    pub fn with_client(db: PgPool, terrain: TerrainClient) -> Self {
        Self {
            db,
            terrain: Some(terrain),
        }
    }

    /// Sample elevation at a point from the zoom-14 terrain tile and store it
    pub async fn sample_and_store(&self, point: GeoPoint) -> AppResult<TopographyResponse> {
        let client = self
            .terrain
            .as_ref()
            .ok_or_else(|| AppError::Internal("Terrain client not configured".to_string()))?;

        let tile = TileIndex::containing(point, TERRAIN_ZOOM).ok_or_else(|| {
            AppError::Validation(format!(
                "No map tile contains ({}, {})",
                point.latitude, point.longitude
            ))
        })?;

        let rgb = client.centre_pixel(tile).await?;
        let slope = rand::thread_rng().gen_range(0.0..MAX_PLACEHOLDER_SLOPE);
        let sample = TopographySample::from_terrain_pixel(point, rgb, slope);
        tracing::debug!(?rgb, elevation = sample.elevation, "Decoded terrain pixel");

        let record = self.store(&sample).await?;
        Ok(TopographyResponse {
            message: "Topography data stored".to_string(),
            data: record,
        })
    }

    pub async fn store(&self, sample: &TopographySample) -> AppResult<TopographyRecord> {
        let record = sqlx::query_as::<_, TopographyRecord>(
            r#"
            INSERT INTO topography_samples (latitude, longitude, elevation, slope, vegetation_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, latitude, longitude, elevation, slope, vegetation_type, created_at
            "#,
        )
        .bind(sample.latitude)
        .bind(sample.longitude)
        .bind(sample.elevation)
        .bind(sample.slope)
        .bind(&sample.vegetation_type)
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }
}
