//! Display formatting helpers
//!
//! Small pure functions shared by the UI: compass labels for wind bearings,
//! local clock time for epoch instants, and "N/A" placeholders for readings
//! the upstream did not report.

use std::fmt::Display;

use chrono::DateTime;

/// Compass labels clockwise from North, one per 45 degree sector
pub const COMPASS_POINTS: [&str; 8] = [
    "North",
    "North East",
    "East",
    "South East",
    "South",
    "South West",
    "West",
    "North West",
];

/// Label the compass sector a wind bearing falls into.
///
/// Bearings are in degrees clockwise from North. Each sector is 45 degrees
/// wide and centered on its label, so North covers 337.5 up to 22.5.
/// Out-of-range bearings are normalized into [0, 360) first.
pub fn wind_direction(degrees: f64) -> &'static str {
    let normalized = ((degrees % 360.0) + 360.0) % 360.0;
    let index = ((normalized / 45.0) + 0.5).floor() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// Format an epoch instant as clock time in the location's own timezone.
///
/// `utc_offset` is that timezone's offset from UTC in seconds. When either
/// value is absent, or the shifted instant is unrepresentable, the result
/// is "N/A".
pub fn local_time_of_epoch(epoch: Option<i64>, utc_offset: Option<i64>) -> String {
    let (Some(epoch), Some(offset)) = (epoch, utc_offset) else {
        return "N/A".to_string();
    };

    epoch
        .checked_add(offset)
        .and_then(|shifted| DateTime::from_timestamp(shifted, 0))
        .map(|instant| instant.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Render a reading with its unit, or "N/A" when absent
pub fn or_na<T: Display>(value: Option<T>, unit: &str) -> String {
    match value {
        Some(value) => format!("{value}{unit}"),
        None => "N/A".to_string(),
    }
}

/// Render a float reading to one decimal with its unit, or "N/A" when absent
pub fn or_na_f64(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{value:.1}{unit}"),
        None => "N/A".to_string(),
    }
}
