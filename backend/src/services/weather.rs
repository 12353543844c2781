//! Weather ingestion

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use shared::models::WeatherObservation;
use shared::types::{GeoPoint, StoredBatch};

use crate::error::{AppError, AppResult};
use crate::external::NoaaClient;
use crate::services::MAX_BIND_PARAMS;

const COLUMNS: usize = 8;

/// Weather service
#[derive(Clone)]
pub struct WeatherService {
    db: PgPool,
    noaa: Option<NoaaClient>,
}

/// Stored forecast period
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub precipitation: f64,
    pub forecast: String,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl WeatherService {
    pub fn new(db: PgPool) -> Self {
        Self { db, noaa: None }
    }

    pub fn with_client(db: PgPool, noaa: NoaaClient) -> Self {
        Self {
            db,
            noaa: Some(noaa),
        }
    }

    /// Fetch the NOAA forecast for a point and store every period
    pub async fn fetch_and_store(&self, point: GeoPoint) -> AppResult<StoredBatch<WeatherRecord>> {
        let client = self
            .noaa
            .as_ref()
            .ok_or_else(|| AppError::Internal("NOAA client not configured".to_string()))?;

        let observations = client.forecast(point).await?;
        let stored = self.store(&observations).await?;
        tracing::info!("Stored {} forecast periods", stored.len());

        Ok(StoredBatch::new("NOAA Weather data stored successfully", stored))
    }

    /// Insert observations in one transaction
    pub async fn store(&self, observations: &[WeatherObservation]) -> AppResult<Vec<WeatherRecord>> {
        if observations.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.db.begin().await?;
        let mut stored = Vec::with_capacity(observations.len());

        for chunk in observations.chunks(MAX_BIND_PARAMS / COLUMNS) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO weather_observations \
                 (latitude, longitude, temperature, humidity, wind_speed, precipitation, forecast, timestamp) ",
            );
            builder.push_values(chunk, |mut row, obs| {
                row.push_bind(obs.latitude)
                    .push_bind(obs.longitude)
                    .push_bind(obs.temperature)
                    .push_bind(obs.humidity)
                    .push_bind(obs.wind_speed)
                    .push_bind(obs.precipitation)
                    .push_bind(&obs.forecast)
                    .push_bind(obs.timestamp);
            });
            builder.push(
                " RETURNING id, latitude, longitude, temperature, humidity, wind_speed, \
                 precipitation, forecast, timestamp, created_at",
            );

            let rows = builder
                .build_query_as::<WeatherRecord>()
                .fetch_all(&mut *tx)
                .await?;
            stored.extend(rows);
        }

        tx.commit().await?;
        Ok(stored)
    }
}
