//! HTTP handler for fire-spread prediction

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::services::prediction::validate_prediction_input;
use crate::AppState;

/// Forward a fire description to the predictor and relay its JSON result
pub async fn predict_fire_spread(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(input) = payload?;
    validate_prediction_input(&input).map_err(|e| AppError::Validation(e.to_string()))?;

    let prediction = state.predictor.predict(&input).await?;
    Ok(Json(prediction))
}
