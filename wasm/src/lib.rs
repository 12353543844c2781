//! WebAssembly module for the Ignis wildfire map
//!
//! Provides client-side computation for:
//! - Brightness severity and confidence bucketing
//! - Great-circle distance
//! - Category filtering and nearby-fire lists over the fetched detections

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::classify::*;
pub use shared::distance::*;
pub use shared::models::*;
pub use shared::types::*;

/// Severity label for a brightness reading
#[wasm_bindgen]
pub fn brightness_category(brightness: f64) -> String {
    SeverityCategory::from_brightness(brightness).to_string()
}

/// Raw confidence string as an integer percent
#[wasm_bindgen]
pub fn confidence_percent(raw: &str) -> u8 {
    confidence_to_percent(raw)
}

/// Confidence bucket label for a raw confidence string
#[wasm_bindgen]
pub fn confidence_category(raw: &str) -> String {
    ConfidenceBucket::from_raw(raw).to_string()
}

/// Distance in miles between two points
#[wasm_bindgen]
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_miles(GeoPoint::new(lat1, lon1), GeoPoint::new(lat2, lon2))
}

/// Filter a JSON array of detections by category labels.
///
/// Empty labels mean "any".
#[wasm_bindgen]
pub fn filter_fires(fires_json: &str, severity: &str, confidence: &str) -> Result<String, JsValue> {
    filter_fires_json(fires_json, severity, confidence).map_err(|e| JsValue::from_str(&e))
}

/// Detections within `radius` miles of a point, nearest first, as JSON
#[wasm_bindgen]
pub fn nearby_fires_json(fires_json: &str, lat: f64, lng: f64, radius: f64) -> Result<String, JsValue> {
    nearby_json(fires_json, lat, lng, radius).map_err(|e| JsValue::from_str(&e))
}

fn parse_fires(fires_json: &str) -> Result<Vec<FireDetection>, String> {
    serde_json::from_str(fires_json).map_err(|e| format!("Invalid fires JSON: {}", e))
}

fn parse_filter(severity: &str, confidence: &str) -> Result<FireFilter, String> {
    let severity = match severity.trim() {
        "" => None,
        label => Some(label.parse::<SeverityCategory>().map_err(|e| e.to_string())?),
    };
    let confidence = match confidence.trim() {
        "" => None,
        label => Some(label.parse::<ConfidenceBucket>().map_err(|e| e.to_string())?),
    };
    Ok(FireFilter {
        severity,
        confidence,
    })
}

fn filter_fires_json(fires_json: &str, severity: &str, confidence: &str) -> Result<String, String> {
    let fires = parse_fires(fires_json)?;
    let filter = parse_filter(severity, confidence)?;
    let kept: Vec<&FireDetection> = fires.iter().filter(|f| filter.matches(f)).collect();
    serde_json::to_string(&kept).map_err(|e| e.to_string())
}

fn nearby_json(fires_json: &str, lat: f64, lng: f64, radius: f64) -> Result<String, String> {
    let fires = parse_fires(fires_json)?;
    let nearby = nearby_fires(&fires, GeoPoint::new(lat, lng), radius, FireFilter::default());
    serde_json::to_string(&nearby).map_err(|e| e.to_string())
}
