//! Error handling for the Ignis backend
//!
//! Every failure reaches the client as `{ "error": ..., "details": ... }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::prediction::PredictionError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Client errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // External service errors
    #[error("{context}: {details}")]
    Upstream { context: String, details: String },

    #[error("Prediction error: {0}")]
    Prediction(#[from] PredictionError),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Upstream provider failure with a short context line
    pub fn upstream(context: impl Into<String>, details: impl ToString) -> Self {
        AppError::Upstream {
            context: context.into(),
            details: details.to_string(),
        }
    }
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Validation failed".to_string(),
                    details: Some(msg.clone()),
                },
            ),
            AppError::InvalidBody(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid request body".to_string(),
                    details: Some(msg.clone()),
                },
            ),
            AppError::Upstream { context, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: context.clone(),
                    details: Some(details.clone()),
                },
            ),
            AppError::Prediction(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: err.summary().to_string(),
                    details: Some(err.details()),
                },
            ),
            AppError::Database(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Database error".to_string(),
                    details: Some(err.to_string()),
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    details: Some(msg.clone()),
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
