// ABOUTME: Display string formatters for durations, paces, and activity card statistics
// ABOUTME: Absent or zero inputs degrade to placeholder strings instead of failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use stride_core::constants::units::{METERS_PER_KM, SECONDS_PER_MINUTE};

const SECONDS_PER_HOUR: u64 = 3600;

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Format elapsed seconds as `H:MM:SS` (one hour or more) or `M:SS`
///
/// Fractional seconds are truncated. Absent, zero or negative input gives `"0:00"`.
#[must_use]
pub fn format_duration(seconds: Option<f64>) -> String {
    let Some(seconds) = positive(seconds) else {
        return "0:00".to_owned();
    };
    let total = seconds.trunc() as u64;
    let hours = total / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Format average pace as `M:SS` per kilometer
///
/// Both the minutes and the seconds component are floored, so a pace of
/// 4:59.9 displays as `4:59`. Returns `"N/A"` when either input is absent or zero.
#[must_use]
pub fn format_pace(distance_meters: Option<f64>, duration_seconds: Option<f64>) -> String {
    let (Some(distance), Some(duration)) = (positive(distance_meters), positive(duration_seconds))
    else {
        return "N/A".to_owned();
    };
    let pace = (duration / SECONDS_PER_MINUTE) / (distance / METERS_PER_KM);
    let minutes = pace.floor();
    let seconds = ((pace - minutes) * 60.0).floor();
    format!("{}:{:02}", minutes as u64, seconds as u64)
}

/// Kilometers with two decimals, `"0"` when absent
#[must_use]
pub fn format_distance_km(distance_meters: Option<f64>) -> String {
    positive(distance_meters).map_or_else(
        || "0".to_owned(),
        |meters| format!("{:.2}", meters / METERS_PER_KM),
    )
}

/// Daily total for a calendar badge, one decimal and a `km` suffix
#[must_use]
pub fn format_day_distance(total_km: f64) -> String {
    format!("{total_km:.1}km")
}

/// Average heart rate as whole bpm, `"N/A"` when absent
#[must_use]
pub fn format_heart_rate(average_heart_rate: Option<f64>) -> String {
    positive(average_heart_rate).map_or_else(
        || "N/A".to_owned(),
        |bpm| format!("{}", bpm.round() as u64),
    )
}

/// Calories as a whole number, `"0"` when absent
#[must_use]
pub fn format_calories(calories: Option<f64>) -> String {
    positive(calories).map_or_else(
        || "0".to_owned(),
        |kcal| format!("{}", kcal.round() as u64),
    )
}
