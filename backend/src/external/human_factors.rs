//! Human factors source client
//!
//! The upstream payload has no fixed schema; it is relayed as JSON.

use reqwest::Client;
use serde_json::Value;

use crate::config::HumanFactorsConfig;
use crate::error::{AppError, AppResult};

const FETCH_FAILED: &str = "Failed to fetch human factors data";

#[derive(Clone)]
pub struct HumanFactorsClient {
    client: Client,
    api_url: String,
}

impl HumanFactorsClient {
    pub fn new(client: Client, config: &HumanFactorsConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
        }
    }

    /// Fetch the payload. `None` when the body is empty or JSON `null`.
    pub async fn fetch(&self) -> AppResult<Option<Value>> {
        let response = self
            .client
            .get(&self.api_url)
            .send()
            .await
            .map_err(|e| AppError::upstream(FETCH_FAILED, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                FETCH_FAILED,
                format!("Human factors API error: {} - {}", status, body.trim()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::upstream(FETCH_FAILED, e))?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| AppError::upstream(FETCH_FAILED, e))?;
        Ok(match value {
            Value::Null => None,
            other => Some(other),
        })
    }
}
