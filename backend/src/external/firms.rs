//! NASA FIRMS area API client
//!
//! Fetches the raw area CSV for the configured sensor, bounding box and day
//! range. Parsing lives in `shared::firms`.

use reqwest::Client;

use crate::config::FirmsConfig;
use crate::error::{AppError, AppResult};

const FETCH_FAILED: &str = "Failed to fetch wildfire data";

/// FIRMS client
#[derive(Clone)]
pub struct FirmsClient {
    client: Client,
    base_url: String,
    api_key: String,
    source: String,
    bbox: String,
    day_range: u8,
}

impl FirmsClient {
    pub fn new(client: Client, config: &FirmsConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            source: config.source.clone(),
            bbox: config.bbox.clone(),
            day_range: config.day_range,
        }
    }

    /// `{base}/api/area/csv/{key}/{source}/{bbox}/{days}`
    pub fn area_url(&self) -> String {
        self.url_with_key(&self.api_key)
    }

    fn url_with_key(&self, key: &str) -> String {
        format!(
            "{}/api/area/csv/{}/{}/{}/{}",
            self.base_url, key, self.source, self.bbox, self.day_range
        )
    }

    /// Download the area CSV as text
    pub async fn fetch_area_csv(&self) -> AppResult<String> {
        tracing::info!("Fetching FIRMS area data from {}", self.url_with_key("***"));

        let response = self
            .client
            .get(self.area_url())
            .send()
            .await
            .map_err(|e| AppError::upstream(FETCH_FAILED, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                FETCH_FAILED,
                format!("FIRMS API error: {} - {}", status, body.trim()),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::upstream(FETCH_FAILED, e))
    }
}
