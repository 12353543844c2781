//! Severity and confidence bucketing for fire detections
//!
//! Both the map filters and the nearby-fires panel use these buckets, so the
//! thresholds live here and nowhere else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Brightness at or above which a detection is `Moderate`
pub const MODERATE_BRIGHTNESS: f64 = 325.0;
/// Brightness at or above which a detection is `Severe`
pub const SEVERE_BRIGHTNESS: f64 = 350.0;
/// Brightness at or above which a detection is `Extreme`
pub const EXTREME_BRIGHTNESS: f64 = 375.0;

/// Percent at or above which confidence is `Medium`
pub const MEDIUM_CONFIDENCE_PERCENT: u8 = 40;
/// Percent at or above which confidence is `High`
pub const HIGH_CONFIDENCE_PERCENT: u8 = 85;

/// Percent reported for a VIIRS `l` (low) detection
pub const VIIRS_LOW_PERCENT: u8 = 30;
/// Percent reported for a VIIRS `n` (nominal) detection
pub const VIIRS_NOMINAL_PERCENT: u8 = 60;
/// Percent reported for a VIIRS `h` (high) detection
pub const VIIRS_HIGH_PERCENT: u8 = 90;

/// Error returned when a category label does not match any bucket
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} category: {label}")]
pub struct CategoryParseError {
    pub kind: &'static str,
    pub label: String,
}

/// Fire severity derived from brightness
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityCategory {
    Small,
    Moderate,
    Severe,
    Extreme,
}

impl SeverityCategory {
    /// Bucket a brightness reading
    pub fn from_brightness(brightness: f64) -> Self {
        if brightness >= EXTREME_BRIGHTNESS {
            SeverityCategory::Extreme
        } else if brightness >= SEVERE_BRIGHTNESS {
            SeverityCategory::Severe
        } else if brightness >= MODERATE_BRIGHTNESS {
            SeverityCategory::Moderate
        } else {
            SeverityCategory::Small
        }
    }
}

impl fmt::Display for SeverityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityCategory::Small => write!(f, "Small"),
            SeverityCategory::Moderate => write!(f, "Moderate"),
            SeverityCategory::Severe => write!(f, "Severe"),
            SeverityCategory::Extreme => write!(f, "Extreme"),
        }
    }
}

impl FromStr for SeverityCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(SeverityCategory::Small),
            "moderate" => Ok(SeverityCategory::Moderate),
            "severe" => Ok(SeverityCategory::Severe),
            "extreme" => Ok(SeverityCategory::Extreme),
            _ => Err(CategoryParseError {
                kind: "severity",
                label: s.to_string(),
            }),
        }
    }
}

/// Detection confidence bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceBucket {
    Low,
    Medium,
    High,
}

impl ConfidenceBucket {
    /// Bucket an already normalized percent
    pub fn from_percent(percent: u8) -> Self {
        if percent < MEDIUM_CONFIDENCE_PERCENT {
            ConfidenceBucket::Low
        } else if percent < HIGH_CONFIDENCE_PERCENT {
            ConfidenceBucket::Medium
        } else {
            ConfidenceBucket::High
        }
    }

    /// Bucket a raw confidence string as stored
    pub fn from_raw(raw: &str) -> Self {
        Self::from_percent(confidence_to_percent(raw))
    }
}

impl fmt::Display for ConfidenceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceBucket::Low => write!(f, "Low"),
            ConfidenceBucket::Medium => write!(f, "Medium"),
            ConfidenceBucket::High => write!(f, "High"),
        }
    }
}

impl FromStr for ConfidenceBucket {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(ConfidenceBucket::Low),
            "medium" => Ok(ConfidenceBucket::Medium),
            "high" => Ok(ConfidenceBucket::High),
            _ => Err(CategoryParseError {
                kind: "confidence",
                label: s.to_string(),
            }),
        }
    }
}

fn viirs_confidence_code(raw: &str) -> Option<u8> {
    match raw.trim() {
        "l" | "L" => Some(VIIRS_LOW_PERCENT),
        "n" | "N" => Some(VIIRS_NOMINAL_PERCENT),
        "h" | "H" => Some(VIIRS_HIGH_PERCENT),
        _ => None,
    }
}

/// Normalize a confidence string to an integer percent.
///
/// VIIRS rows carry letter codes (`l`, `n`, `h`) instead of a number; each
/// maps to a representative percent inside its bucket. Numeric values
/// `<= 1` are fractions and get scaled by 100, larger values are already
/// percents. Anything else is 0.
pub fn confidence_to_percent(raw: &str) -> u8 {
    if let Some(percent) = viirs_confidence_code(raw) {
        return percent;
    }
    let value = match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return 0,
    };
    let percent = if value <= 1.0 { value * 100.0 } else { value };
    percent.round().clamp(0.0, 100.0) as u8
}
