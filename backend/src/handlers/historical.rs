//! HTTP handlers for historical wildfire endpoints

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use shared::models::HistoricalWildfireRecord;
use shared::types::StoredBatch;

use crate::error::AppResult;
use crate::handlers::validate_all;
use crate::services::historical::{HistoricalWildfireService, StoredHistoricalWildfire};
use crate::AppState;

/// Store a batch of historical wildfire records
pub async fn store_historical_wildfires(
    State(state): State<AppState>,
    payload: Result<Json<Vec<HistoricalWildfireRecord>>, JsonRejection>,
) -> AppResult<Json<StoredBatch<StoredHistoricalWildfire>>> {
    let Json(records) = payload?;
    validate_all(&records)?;

    let service = HistoricalWildfireService::new(state.db);
    let batch = service.store(&records).await?;
    Ok(Json(batch))
}
