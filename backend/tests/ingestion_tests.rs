//! Ingestion integration tests
//!
//! Properties of the FIRMS parser, the category classifier, the distance
//! engine and the terrain tile math as used by the ingestion routes.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use shared::classify::{confidence_to_percent, ConfidenceBucket, SeverityCategory};
use shared::distance::{haversine_miles, within_radius};
use shared::firms::{parse_area_csv, MIN_AREA_COLUMNS};
use shared::tile::{terrain_rgb_elevation, TileIndex, MAX_MERCATOR_LATITUDE, TERRAIN_ZOOM};
use shared::types::GeoPoint;

const HEADER: &str = "latitude,longitude,bright_ti4,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_ti5,frp,daynight";

fn area_row(lat: f64, lon: f64, brightness: f64, hour: u32, minute: u32) -> String {
    format!(
        "{:.4},{:.4},{:.1},0.39,0.36,2025-04-07,{}{:02},N21,VIIRS,n,2.0NRT,291.2,3.1,N",
        lat, lon, brightness, hour, minute
    )
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_brightness_examples() {
        let expected = [
            (100.0, SeverityCategory::Small),
            (330.0, SeverityCategory::Moderate),
            (360.0, SeverityCategory::Severe),
            (400.0, SeverityCategory::Extreme),
        ];
        for (brightness, category) in expected {
            assert_eq!(SeverityCategory::from_brightness(brightness), category);
        }
    }

    #[test]
    fn test_confidence_examples() {
        assert_eq!(confidence_to_percent("0.2"), 20);
        assert_eq!(confidence_to_percent("0.5"), 50);
        assert_eq!(confidence_to_percent("0.9"), 90);
        assert_eq!(confidence_to_percent("45"), 45);
        assert_eq!(confidence_to_percent("nominal"), 0);
    }

    #[test]
    fn test_la_to_sf() {
        let la = GeoPoint::new(34.0522, -118.2437);
        let sf = GeoPoint::new(37.7749, -122.4194);
        assert!((haversine_miles(la, sf) - 347.0).abs() <= 2.0);
    }

    #[test]
    fn test_header_only_payload() {
        assert!(parse_area_csv(HEADER).detections.is_empty());
        assert!(parse_area_csv(&format!("{HEADER}\n\n")).detections.is_empty());
    }

    #[test]
    fn test_single_row_timestamp() {
        let csv = format!("{HEADER}\n{}", area_row(34.2, -118.0, 331.4, 9, 27));
        let outcome = parse_area_csv(&csv);
        assert_eq!(outcome.detections.len(), 1);
        assert_eq!(
            outcome.detections[0].timestamp,
            Utc.with_ymd_and_hms(2025, 4, 7, 9, 27, 0).unwrap()
        );
    }

    #[test]
    fn test_terrain_examples() {
        assert!(terrain_rgb_elevation(1, 134, 160).abs() < 1e-6);
        let tile = TileIndex::containing(GeoPoint::new(0.0, 0.0), 1).unwrap();
        assert_eq!((tile.x, tile.y), (1, 1));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn latitude_strategy() -> impl Strategy<Value = f64> {
        -90.0f64..=90.0
    }

    fn longitude_strategy() -> impl Strategy<Value = f64> {
        -180.0f64..=180.0
    }

    fn point_strategy() -> impl Strategy<Value = GeoPoint> {
        (latitude_strategy(), longitude_strategy()).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
    }

    fn row_strategy() -> impl Strategy<Value = (f64, f64, f64, u32, u32)> {
        (
            latitude_strategy(),
            longitude_strategy(),
            200.0f64..500.0,
            0u32..24,
            0u32..60,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every well-formed row yields exactly one detection
        #[test]
        fn prop_parser_keeps_well_formed_rows(rows in prop::collection::vec(row_strategy(), 0..40)) {
            let mut csv = HEADER.to_string();
            for (lat, lon, brightness, hour, minute) in &rows {
                csv.push('\n');
                csv.push_str(&area_row(*lat, *lon, *brightness, *hour, *minute));
            }

            let outcome = parse_area_csv(&csv);
            prop_assert_eq!(outcome.detections.len(), rows.len());
            prop_assert_eq!(outcome.dropped_rows(), 0);

            for (detection, (lat, lon, _, hour, minute)) in outcome.detections.iter().zip(&rows) {
                prop_assert!((detection.latitude - lat).abs() < 1e-3);
                prop_assert!((detection.longitude - lon).abs() < 1e-3);
                let expected = Utc.with_ymd_and_hms(2025, 4, 7, *hour, *minute, 0).unwrap();
                prop_assert_eq!(detection.timestamp, expected);
            }
        }

        /// Rows with fewer than 14 columns never yield a detection
        #[test]
        fn prop_parser_drops_short_rows(
            row in row_strategy(),
            keep in 1usize..MIN_AREA_COLUMNS
        ) {
            let (lat, lon, brightness, hour, minute) = row;
            let full = area_row(lat, lon, brightness, hour, minute);
            let short: Vec<&str> = full.split(',').take(keep).collect();
            let csv = format!("{HEADER}\n{}", short.join(","));

            let outcome = parse_area_csv(&csv);
            prop_assert!(outcome.detections.is_empty());
            prop_assert_eq!(outcome.short_rows, 1);
        }

        /// Severity never decreases as brightness grows
        #[test]
        fn prop_severity_monotonic(a in 0.0f64..1000.0, b in 0.0f64..1000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(SeverityCategory::from_brightness(lo) <= SeverityCategory::from_brightness(hi));
        }

        /// Any confidence string maps into 0..=100
        #[test]
        fn prop_confidence_in_range(raw in ".{0,12}") {
            let percent = confidence_to_percent(&raw);
            prop_assert!(percent <= 100);
            let _ = ConfidenceBucket::from_raw(&raw);
        }

        /// Fractions are scaled to percent
        #[test]
        fn prop_fraction_scaled(fraction in 0.0f64..=1.0) {
            let percent = confidence_to_percent(&format!("{:.2}", fraction));
            let expected = (format!("{:.2}", fraction).parse::<f64>().unwrap() * 100.0).round();
            prop_assert_eq!(f64::from(percent), expected);
        }

        /// Distance is symmetric, non-negative and zero to itself
        #[test]
        fn prop_distance_metric(a in point_strategy(), b in point_strategy()) {
            let ab = haversine_miles(a, b);
            let ba = haversine_miles(b, a);
            prop_assert!(ab >= 0.0);
            prop_assert!((ab - ba).abs() < 1e-6);
            prop_assert!(haversine_miles(a, a).abs() < 1e-9);
            // Half the circumference bounds every great-circle distance
            prop_assert!(ab <= std::f64::consts::PI * 3958.8 + 1e-6);
        }

        /// Radius filtering keeps only points within the radius
        #[test]
        fn prop_radius_filter(
            center in point_strategy(),
            points in prop::collection::vec(point_strategy(), 0..30),
            radius in -10.0f64..5000.0
        ) {
            let kept = within_radius(&points, center, radius);
            if radius <= 0.0 {
                prop_assert!(kept.is_empty());
            }
            for (_, distance) in &kept {
                prop_assert!(*distance <= radius);
            }
            let expected = points
                .iter()
                .filter(|p| haversine_miles(center, **p) <= radius)
                .count();
            if radius > 0.0 {
                prop_assert_eq!(kept.len(), expected);
            }
        }

        /// Tile indices stay inside the zoom-level grid
        #[test]
        fn prop_tile_in_grid(
            lat in -MAX_MERCATOR_LATITUDE..=MAX_MERCATOR_LATITUDE,
            lon in longitude_strategy()
        ) {
            let tile = TileIndex::containing(GeoPoint::new(lat, lon), TERRAIN_ZOOM).unwrap();
            let n = 1u32 << TERRAIN_ZOOM;
            prop_assert!(tile.x < n);
            prop_assert!(tile.y < n);
        }
    }
}
