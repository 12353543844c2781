//! Parser for the NASA FIRMS "area" CSV export
//!
//! The area API returns one header line followed by one line per hotspot:
//!
//! ```text
//! latitude,longitude,bright_ti4,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_ti5,frp,daynight
//! 34.2271,-118.0562,331.4,0.39,0.36,2025-04-07,927,N21,VIIRS,n,2.0NRT,291.2,3.1,N
//! ```
//!
//! The header is skipped without looking at it. Fields are split on commas
//! with no quoting rules, and bad rows are dropped rather than reported.

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::models::FireDetection;
use crate::validation::{validate_brightness, validate_coordinates};

/// Rows with fewer columns than this are not area-format rows
pub const MIN_AREA_COLUMNS: usize = 14;

const LATITUDE: usize = 0;
const LONGITUDE: usize = 1;
const BRIGHT_TI4: usize = 2;
const ACQ_DATE: usize = 5;
const ACQ_TIME: usize = 6;
const SATELLITE: usize = 7;
const CONFIDENCE: usize = 9;

/// Result of parsing one CSV payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub detections: Vec<FireDetection>,
    /// Rows with fewer than [`MIN_AREA_COLUMNS`] columns
    pub short_rows: usize,
    /// Rows with enough columns but bad numbers or timestamp
    pub invalid_rows: usize,
}

impl ParseOutcome {
    pub fn dropped_rows(&self) -> usize {
        self.short_rows + self.invalid_rows
    }
}

/// Parse an area CSV payload into fire detections
pub fn parse_area_csv(text: &str) -> ParseOutcome {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.trim().as_bytes());

    let mut outcome = ParseOutcome::default();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(_) => {
                outcome.invalid_rows += 1;
                continue;
            }
        };
        if record.len() < MIN_AREA_COLUMNS {
            outcome.short_rows += 1;
            continue;
        }
        match parse_row(&record) {
            Some(detection) => outcome.detections.push(detection),
            None => outcome.invalid_rows += 1,
        }
    }
    outcome
}

fn parse_row(record: &StringRecord) -> Option<FireDetection> {
    let latitude = parse_number(&record[LATITUDE])?;
    let longitude = parse_number(&record[LONGITUDE])?;
    let brightness = parse_number(&record[BRIGHT_TI4])?;
    validate_coordinates(latitude, longitude).ok()?;
    validate_brightness(brightness).ok()?;

    let timestamp = acquisition_instant(&record[ACQ_DATE], &record[ACQ_TIME])?;

    Some(FireDetection {
        latitude,
        longitude,
        brightness,
        confidence: record[CONFIDENCE].to_string(),
        satellite: record[SATELLITE].to_string(),
        timestamp,
    })
}

fn parse_number(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Combine `acq_date` (`YYYY-MM-DD`) and `acq_time` (`HMM`/`HHMM`, UTC)
/// into one instant.
pub fn acquisition_instant(acq_date: &str, acq_time: &str) -> Option<DateTime<Utc>> {
    let hhmm = format!("{:0>4}", acq_time);
    let split = hhmm.char_indices().nth(2).map(|(i, _)| i)?;
    let (hours, minutes) = hhmm.split_at(split);
    let iso = format!("{acq_date}T{hours}:{minutes}:00Z");
    DateTime::parse_from_rfc3339(&iso)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
