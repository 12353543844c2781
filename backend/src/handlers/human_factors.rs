//! HTTP handlers for human factors endpoints

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use shared::models::HumanFactorsSample;
use shared::types::StoredBatch;

use crate::error::AppResult;
use crate::external::HumanFactorsClient;
use crate::handlers::validate_all;
use crate::services::human_factors::{HumanFactorsRecord, HumanFactorsResponse, HumanFactorsService};
use crate::AppState;

/// Relay the configured human factors source
pub async fn fetch_human_factors(
    State(state): State<AppState>,
) -> AppResult<Json<HumanFactorsResponse>> {
    let client = HumanFactorsClient::new(state.http.clone(), &state.config.human_factors);
    let service = HumanFactorsService::with_client(state.db, client);
    let response = service.fetch().await?;
    Ok(Json(response))
}

/// Store a batch of human factors samples
pub async fn store_human_factors(
    State(state): State<AppState>,
    payload: Result<Json<Vec<HumanFactorsSample>>, JsonRejection>,
) -> AppResult<Json<StoredBatch<HumanFactorsRecord>>> {
    let Json(samples) = payload?;
    validate_all(&samples)?;

    let service = HumanFactorsService::new(state.db);
    let batch = service.store(&samples).await?;
    Ok(Json(batch))
}
