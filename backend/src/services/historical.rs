//! Historical wildfire storage

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use shared::models::HistoricalWildfireRecord;
use shared::types::StoredBatch;

use crate::error::AppResult;
use crate::services::MAX_BIND_PARAMS;

const COLUMNS: usize = 6;

#[derive(Clone)]
pub struct HistoricalWildfireService {
    db: PgPool,
}

/// Stored historical fire
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StoredHistoricalWildfire {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub fire_size: f64,
    pub cause: Option<String>,
    pub duration: Option<f64>,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

impl HistoricalWildfireService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Insert validated records in one transaction
    pub async fn store(
        &self,
        records: &[HistoricalWildfireRecord],
    ) -> AppResult<StoredBatch<StoredHistoricalWildfire>> {
        let mut stored = Vec::with_capacity(records.len());
        if !records.is_empty() {
            let mut tx = self.db.begin().await?;
            for chunk in records.chunks(MAX_BIND_PARAMS / COLUMNS) {
                let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                    "INSERT INTO historical_wildfires (latitude, longitude, fire_size, cause, duration, year) ",
                );
                builder.push_values(chunk, |mut row, record| {
                    row.push_bind(record.latitude)
                        .push_bind(record.longitude)
                        .push_bind(record.fire_size)
                        .push_bind(&record.cause)
                        .push_bind(record.duration)
                        .push_bind(record.year);
                });
                builder.push(
                    " RETURNING id, latitude, longitude, fire_size, cause, duration, year, created_at",
                );

                let rows = builder
                    .build_query_as::<StoredHistoricalWildfire>()
                    .fetch_all(&mut *tx)
                    .await?;
                stored.extend(rows);
            }
            tx.commit().await?;
        }

        tracing::info!("Stored {} historical wildfires", stored.len());
        Ok(StoredBatch::new("Historical wildfire data stored", stored))
    }
}
