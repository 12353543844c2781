//! Human factors proxy and storage

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use shared::models::HumanFactorsSample;
use shared::types::StoredBatch;

use crate::error::{AppError, AppResult};
use crate::external::HumanFactorsClient;
use crate::services::MAX_BIND_PARAMS;

const COLUMNS: usize = 6;

#[derive(Clone)]
pub struct HumanFactorsService {
    db: PgPool,
    source: Option<HumanFactorsClient>,
}

/// Stored human factors sample
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HumanFactorsRecord {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub population_density: Option<f64>,
    pub road_proximity: Option<f64>,
    pub fire_stations_nearby: Option<i32>,
    pub urbanization_index: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Relayed upstream payload
#[derive(Debug, Serialize)]
pub struct HumanFactorsResponse {
    pub message: String,
    pub data: Value,
}

impl HumanFactorsService {
    pub fn new(db: PgPool) -> Self {
        Self { db, source: None }
    }

    pub fn with_client(db: PgPool, source: HumanFactorsClient) -> Self {
        Self {
            db,
            source: Some(source),
        }
    }

    /// Relay the configured source verbatim
    pub async fn fetch(&self) -> AppResult<HumanFactorsResponse> {
        let client = self
            .source
            .as_ref()
            .ok_or_else(|| AppError::Internal("Human factors client not configured".to_string()))?;

        let data = client.fetch().await?.ok_or_else(|| {
            AppError::upstream("No human factors data received", "upstream returned an empty payload")
        })?;

        Ok(HumanFactorsResponse {
            message: "Human factors data fetched successfully".to_string(),
            data,
        })
    }

    /// Insert validated samples in one transaction
    pub async fn store(&self, samples: &[HumanFactorsSample]) -> AppResult<StoredBatch<HumanFactorsRecord>> {
        let mut stored = Vec::with_capacity(samples.len());
        if !samples.is_empty() {
            let mut tx = self.db.begin().await?;
            for chunk in samples.chunks(MAX_BIND_PARAMS / COLUMNS) {
                let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                    "INSERT INTO human_factors_samples \
                     (latitude, longitude, population_density, road_proximity, fire_stations_nearby, urbanization_index) ",
                );
                builder.push_values(chunk, |mut row, sample| {
                    row.push_bind(sample.latitude)
                        .push_bind(sample.longitude)
                        .push_bind(sample.population_density)
                        .push_bind(sample.road_proximity)
                        .push_bind(sample.fire_stations_nearby)
                        .push_bind(sample.urbanization_index);
                });
                builder.push(
                    " RETURNING id, latitude, longitude, population_density, road_proximity, \
                     fire_stations_nearby, urbanization_index, created_at",
                );

                let rows = builder
                    .build_query_as::<HumanFactorsRecord>()
                    .fetch_all(&mut *tx)
                    .await?;
                stored.extend(rows);
            }
            tx.commit().await?;
        }

        tracing::info!("Stored {} human factors samples", stored.len());
        Ok(StoredBatch::new("Human factors data stored", stored))
    }
}
