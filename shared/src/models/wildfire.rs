//! Fire detection models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{confidence_to_percent, ConfidenceBucket, SeverityCategory};
use crate::distance::within_radius;
use crate::types::{GeoPoint, Located};

/// One satellite hotspot observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FireDetection {
    pub latitude: f64,
    pub longitude: f64,
    /// bright_ti4, Kelvin
    pub brightness: f64,
    /// Raw confidence as delivered by the feed
    pub confidence: String,
    pub satellite: String,
    pub timestamp: DateTime<Utc>,
}

impl FireDetection {
    pub fn severity(&self) -> SeverityCategory {
        SeverityCategory::from_brightness(self.brightness)
    }

    pub fn confidence_percent(&self) -> u8 {
        confidence_to_percent(&self.confidence)
    }

    pub fn confidence_bucket(&self) -> ConfidenceBucket {
        ConfidenceBucket::from_percent(self.confidence_percent())
    }
}

impl Located for FireDetection {
    fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Optional category filters, as offered by the map controls
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FireFilter {
    pub severity: Option<SeverityCategory>,
    pub confidence: Option<ConfidenceBucket>,
}

impl FireFilter {
    pub fn matches(&self, fire: &FireDetection) -> bool {
        self.severity.map_or(true, |s| fire.severity() == s)
            && self.confidence.map_or(true, |c| fire.confidence_bucket() == c)
    }
}

/// A detection near a point of interest, with its derived categories
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NearbyFire {
    pub detection: FireDetection,
    /// Miles from the point of interest
    pub distance: f64,
    pub severity: SeverityCategory,
    pub confidence_percent: u8,
    pub confidence_bucket: ConfidenceBucket,
}

impl NearbyFire {
    pub fn new(detection: FireDetection, distance: f64) -> Self {
        let confidence_percent = detection.confidence_percent();
        Self {
            severity: detection.severity(),
            confidence_percent,
            confidence_bucket: ConfidenceBucket::from_percent(confidence_percent),
            detection,
            distance,
        }
    }
}

/// Detections matching `filter` within `radius_miles` of `center`, nearest first
pub fn nearby_fires(
    fires: &[FireDetection],
    center: GeoPoint,
    radius_miles: f64,
    filter: FireFilter,
) -> Vec<NearbyFire> {
    let mut nearby: Vec<NearbyFire> = within_radius(fires, center, radius_miles)
        .into_iter()
        .filter(|(fire, _)| filter.matches(fire))
        .map(|(fire, distance)| NearbyFire::new(fire.clone(), distance))
        .collect();
    nearby.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    nearby
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fire(lat: f64, lon: f64, brightness: f64, confidence: &str) -> FireDetection {
        FireDetection {
            latitude: lat,
            longitude: lon,
            brightness,
            confidence: confidence.to_string(),
            satellite: "N21".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 4, 7, 9, 27, 0).unwrap(),
        }
    }

    #[test]
    fn test_derived_categories() {
        let f = fire(34.0, -118.0, 360.0, "0.9");
        assert_eq!(f.severity(), SeverityCategory::Severe);
        assert_eq!(f.confidence_percent(), 90);
        assert_eq!(f.confidence_bucket(), ConfidenceBucket::High);
    }

    #[test]
    fn test_nearby_fire_percent_matches_bucket() {
        for (code, percent, bucket) in [
            ("l", 30, ConfidenceBucket::Low),
            ("n", 60, ConfidenceBucket::Medium),
            ("h", 90, ConfidenceBucket::High),
        ] {
            let near = NearbyFire::new(fire(34.0, -118.0, 330.0, code), 1.0);
            assert_eq!(near.confidence_percent, percent, "{}", code);
            assert_eq!(near.confidence_bucket, bucket, "{}", code);
            assert_eq!(
                ConfidenceBucket::from_percent(near.confidence_percent),
                near.confidence_bucket
            );
        }
    }

    #[test]
    fn test_filter_matches() {
        let f = fire(34.0, -118.0, 330.0, "n");
        assert!(FireFilter::default().matches(&f));
        assert!(FireFilter {
            severity: Some(SeverityCategory::Moderate),
            confidence: Some(ConfidenceBucket::Medium),
        }
        .matches(&f));
        assert!(!FireFilter {
            severity: Some(SeverityCategory::Extreme),
            confidence: None,
        }
        .matches(&f));
    }

    #[test]
    fn test_nearby_fires_sorted_and_filtered() {
        let center = GeoPoint::new(34.0522, -118.2437);
        let fires = vec![
            fire(34.30, -118.40, 400.0, "h"), // ~19 mi
            fire(34.06, -118.25, 330.0, "l"), // <1 mi
            fire(37.77, -122.42, 400.0, "h"), // SF, out of range
        ];

        let all = nearby_fires(&fires, center, 50.0, FireFilter::default());
        assert_eq!(all.len(), 2);
        assert!(all[0].distance < all[1].distance);
        assert_eq!(all[0].severity, SeverityCategory::Moderate);

        let extreme = nearby_fires(
            &fires,
            center,
            50.0,
            FireFilter {
                severity: Some(SeverityCategory::Extreme),
                confidence: None,
            },
        );
        assert_eq!(extreme.len(), 1);
        assert_eq!(extreme[0].confidence_bucket, ConfidenceBucket::High);

        assert!(nearby_fires(&fires, center, 0.0, FireFilter::default()).is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(fire(1.0, 2.0, 300.0, "0.5")).unwrap();
        assert_eq!(json["confidence"], "0.5");
        assert_eq!(json["timestamp"], "2025-04-07T09:27:00Z");
    }
}
