//! Wildfire ingestion and queries

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use shared::firms::parse_area_csv;
use shared::models::{nearby_fires, FireDetection, FireFilter, NearbyFire};
use shared::types::{GeoPoint, StoredBatch};

use crate::error::{AppError, AppResult};
use crate::external::FirmsClient;
use crate::services::MAX_BIND_PARAMS;

const COLUMNS: usize = 6;

/// Wildfire service
#[derive(Clone)]
pub struct WildfireService {
    db: PgPool,
    firms: Option<FirmsClient>,
}

/// Stored hotspot
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WildfireRecord {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub brightness: f64,
    pub confidence: String,
    pub satellite: String,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct DetectionRow {
    latitude: f64,
    longitude: f64,
    brightness: f64,
    confidence: String,
    satellite: String,
    timestamp: DateTime<Utc>,
}

impl From<DetectionRow> for FireDetection {
    fn from(row: DetectionRow) -> Self {
        FireDetection {
            latitude: row.latitude,
            longitude: row.longitude,
            brightness: row.brightness,
            confidence: row.confidence,
            satellite: row.satellite,
            timestamp: row.timestamp,
        }
    }
}

/// Query for detections around a point
#[derive(Debug, Clone, Copy)]
pub struct NearbyQuery {
    pub center: GeoPoint,
    /// Miles
    pub radius: f64,
    pub filter: FireFilter,
    /// Only detections acquired within this many hours
    pub hours: u32,
}

/// Start of a look-back window ending at `now`
fn window_start(now: DateTime<Utc>, hours: u32) -> AppResult<DateTime<Utc>> {
    now.checked_sub_signed(Duration::hours(i64::from(hours)))
        .ok_or_else(|| AppError::Validation(format!("hours window of {} is out of range", hours)))
}

impl WildfireService {
    pub fn new(db: PgPool) -> Self {
        Self { db, firms: None }
    }

    pub fn with_client(db: PgPool, firms: FirmsClient) -> Self {
        Self {
            db,
            firms: Some(firms),
        }
    }

    /// Pull the latest FIRMS area export and store every valid row
    pub async fn fetch_and_store(&self) -> AppResult<StoredBatch<WildfireRecord>> {
        let client = self
            .firms
            .as_ref()
            .ok_or_else(|| AppError::Internal("FIRMS client not configured".to_string()))?;

        let csv = client.fetch_area_csv().await?;
        let outcome = parse_area_csv(&csv);
        tracing::info!(
            parsed = outcome.detections.len(),
            short_rows = outcome.short_rows,
            invalid_rows = outcome.invalid_rows,
            "Parsed FIRMS area CSV"
        );

        if outcome.detections.is_empty() {
            tracing::warn!("No valid wildfire rows parsed");
            return Ok(StoredBatch::new("No valid fire data", Vec::new()));
        }

        let stored = self.store(&outcome.detections).await?;
        tracing::info!("Inserted {} wildfires", stored.len());

        Ok(StoredBatch::new("Wildfire data fetched & stored", stored))
    }

    /// Insert detections in one transaction
    pub async fn store(&self, detections: &[FireDetection]) -> AppResult<Vec<WildfireRecord>> {
        if detections.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.db.begin().await?;
        let mut stored = Vec::with_capacity(detections.len());

        for chunk in detections.chunks(MAX_BIND_PARAMS / COLUMNS) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO wildfires (latitude, longitude, brightness, confidence, satellite, timestamp) ",
            );
            builder.push_values(chunk, |mut row, fire| {
                row.push_bind(fire.latitude)
                    .push_bind(fire.longitude)
                    .push_bind(fire.brightness)
                    .push_bind(&fire.confidence)
                    .push_bind(&fire.satellite)
                    .push_bind(fire.timestamp);
            });
            builder.push(
                " RETURNING id, latitude, longitude, brightness, confidence, satellite, timestamp, created_at",
            );

            let rows = builder
                .build_query_as::<WildfireRecord>()
                .fetch_all(&mut *tx)
                .await?;
            stored.extend(rows);
        }

        tx.commit().await?;
        Ok(stored)
    }

    /// Stored detections acquired at or after `since`, one per
    /// (latitude, longitude, timestamp, satellite)
    pub async fn recent_detections(&self, since: DateTime<Utc>) -> AppResult<Vec<FireDetection>> {
        let rows = sqlx::query_as::<_, DetectionRow>(
            r#"
            SELECT DISTINCT ON (latitude, longitude, timestamp, satellite)
                   latitude, longitude, brightness, confidence, satellite, timestamp
            FROM wildfires
            WHERE timestamp >= $1
            ORDER BY latitude, longitude, timestamp, satellite, created_at DESC
            "#,
        )
        .bind(since)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(FireDetection::from).collect())
    }

    /// Recent detections near a point, nearest first
    pub async fn nearby(&self, query: NearbyQuery) -> AppResult<Vec<NearbyFire>> {
        let since = window_start(Utc::now(), query.hours)?;
        let detections = self.recent_detections(since).await?;
        let nearby = nearby_fires(&detections, query.center, query.radius, query.filter);

        tracing::debug!(
            scanned = detections.len(),
            matched = nearby.len(),
            "Nearby wildfire query"
        );
        Ok(nearby)
    }
}
