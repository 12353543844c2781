//! NOAA api.weather.gov client
//!
//! Two-step lookup: `/points/{lat},{lon}` yields the forecast office grid,
//! then `/gridpoints/{office}/{x},{y}/forecast` yields the forecast periods.

use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Client;
use serde::Deserialize;

use shared::models::{WeatherObservation, DEFAULT_FORECAST};
use shared::types::GeoPoint;

use crate::config::NoaaConfig;
use crate::error::{AppError, AppResult};

const FETCH_FAILED: &str = "Failed to fetch weather data";

/// NOAA client
#[derive(Clone)]
pub struct NoaaClient {
    client: Client,
    base_url: String,
}

/// `/points` response
#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: Option<PointsProperties>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsProperties {
    grid_id: String,
    grid_x: i64,
    grid_y: i64,
}

/// `/gridpoints/.../forecast` response
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: Option<ForecastProperties>,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    #[serde(default)]
    periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastPeriod {
    start_time: DateTime<FixedOffset>,
    temperature: f64,
    relative_humidity: Option<QuantitativeValue>,
    wind_speed: Option<String>,
    probability_of_precipitation: Option<QuantitativeValue>,
    short_forecast: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuantitativeValue {
    value: Option<f64>,
}

impl NoaaClient {
    pub fn new(client: Client, config: &NoaaConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Forecast periods for a point, one observation per period
    pub async fn forecast(&self, point: GeoPoint) -> AppResult<Vec<WeatherObservation>> {
        let points_url = format!(
            "{}/points/{},{}",
            self.base_url, point.latitude, point.longitude
        );
        let points: PointsResponse = self.get_json(&points_url).await?;
        let grid = points
            .properties
            .ok_or_else(|| AppError::upstream(FETCH_FAILED, "NOAA grid data unavailable"))?;

        let forecast_url = format!(
            "{}/gridpoints/{}/{},{}/forecast",
            self.base_url, grid.grid_id, grid.grid_x, grid.grid_y
        );
        tracing::info!("Fetching NOAA forecast from {}", forecast_url);

        let forecast: ForecastResponse = self.get_json(&forecast_url).await?;
        let properties = forecast
            .properties
            .ok_or_else(|| AppError::upstream(FETCH_FAILED, "No forecast data available"))?;

        Ok(properties
            .periods
            .into_iter()
            .map(|period| period.into_observation(point))
            .collect())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::upstream(FETCH_FAILED, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                FETCH_FAILED,
                format!("NOAA API error: {} - {}", status, body.trim()),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::upstream(FETCH_FAILED, format!("Failed to parse NOAA response: {}", e)))
    }
}

impl ForecastPeriod {
    fn into_observation(self, point: GeoPoint) -> WeatherObservation {
        WeatherObservation {
            latitude: point.latitude,
            longitude: point.longitude,
            temperature: self.temperature,
            humidity: self.relative_humidity.and_then(|v| v.value),
            wind_speed: self.wind_speed.as_deref().and_then(parse_wind_speed),
            precipitation: self
                .probability_of_precipitation
                .and_then(|v| v.value)
                .unwrap_or(0.0),
            forecast: self
                .short_forecast
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FORECAST.to_string()),
            timestamp: self.start_time.with_timezone(&Utc),
        }
    }
}

/// Leading number of a wind string such as `"10 mph"` or `"5 to 10 mph"`
pub fn parse_wind_speed(raw: &str) -> Option<f64> {
    raw.split_whitespace()
        .next()
        .and_then(|n| n.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_wind_speed() {
        assert_eq!(parse_wind_speed("10 mph"), Some(10.0));
        assert_eq!(parse_wind_speed("5 to 10 mph"), Some(5.0));
        assert_eq!(parse_wind_speed("calm"), None);
        assert_eq!(parse_wind_speed(""), None);
    }

    #[test]
    fn test_period_conversion_defaults() {
        let period: ForecastPeriod = serde_json::from_str(
            r#"{
                "startTime": "2025-04-07T06:00:00-07:00",
                "temperature": 61,
                "windSpeed": "10 mph",
                "probabilityOfPrecipitation": {"value": null},
                "relativeHumidity": {"value": 72}
            }"#,
        )
        .unwrap();

        let obs = period.into_observation(GeoPoint::new(34.0522, -118.2437));
        assert_eq!(obs.temperature, 61.0);
        assert_eq!(obs.humidity, Some(72.0));
        assert_eq!(obs.wind_speed, Some(10.0));
        assert_eq!(obs.precipitation, 0.0);
        assert_eq!(obs.forecast, "No forecast available");
        assert_eq!(obs.timestamp, Utc.with_ymd_and_hms(2025, 4, 7, 13, 0, 0).unwrap());
    }
}
