// ABOUTME: Activity model as delivered by the upstream fitness service
// ABOUTME: Lenient numeric accessors and wall-clock start time parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Activity type tag as nested by Garmin Connect (`activityType.typeKey`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityType {
    /// Free-form activity-type key (e.g. `running`, `road_biking`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_key: Option<String>,
    /// Other upstream fields (`typeId`, `parentTypeId`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActivityType {
    /// Type tag with only a `typeKey`
    #[must_use]
    pub fn new(type_key: impl Into<String>) -> Self {
        Self {
            type_key: Some(type_key.into()),
            extra: Map::new(),
        }
    }
}

/// Represents a single workout activity
///
/// Read-only to the scoring and calendar code. The serde names match the
/// upstream payload, and fields this crate does not model are kept in
/// `extra`, so the same type round-trips through the stateless
/// `/api/activities` endpoint unchanged. Every field is optional: a missing
/// distance, duration or heart rate is a valid activity that scores as zero
/// in that dimension.
///
/// # Examples
///
/// ```rust
/// use stride_core::models::Activity;
///
/// let activity: Activity = serde_json::from_str(
///     r#"{"activityId": 42, "distance": 5000.0, "duration": 1500.0,
///         "startTimeLocal": "2024-06-01 07:00:00",
///         "activityType": {"typeKey": "running"}}"#,
/// ).unwrap();
///
/// assert!((activity.distance_km() - 5.0).abs() < f64::EPSILON);
/// assert_eq!(activity.type_key(), Some("running"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    /// Upstream activity identifier
    #[serde(rename = "activityId", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// User-visible activity name
    #[serde(rename = "activityName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Activity type wrapper carrying the `typeKey`
    #[serde(rename = "activityType", skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<ActivityType>,
    /// Distance in meters
    #[serde(rename = "distance", skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
    /// Elapsed duration in seconds
    #[serde(rename = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// Average heart rate in bpm
    #[serde(rename = "averageHR", skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<f64>,
    /// Energy expenditure in kilocalories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Local wall-clock start time, no offset (`2024-06-01 07:00:00`)
    #[serde(rename = "startTimeLocal", skip_serializing_if = "Option::is_none")]
    pub start_time_local: Option<String>,
    /// Upstream fields not modelled above, passed through as received
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Timestamp shapes accepted for `startTimeLocal`, most common first
const LOCAL_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Clamp absent, negative and non-finite readings to zero
fn non_negative(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(0.0)
}

impl Activity {
    /// Distance in meters, zero when absent
    #[must_use]
    pub fn distance(&self) -> f64 {
        non_negative(self.distance_meters)
    }

    /// Distance in kilometers, zero when absent
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance() / 1000.0
    }

    /// Duration in seconds, zero when absent
    #[must_use]
    pub fn duration(&self) -> f64 {
        non_negative(self.duration_seconds)
    }

    /// Duration in minutes, zero when absent
    #[must_use]
    pub fn duration_minutes(&self) -> f64 {
        self.duration() / 60.0
    }

    /// Average heart rate in bpm, zero when absent
    #[must_use]
    pub fn heart_rate(&self) -> f64 {
        non_negative(self.average_heart_rate)
    }

    /// The upstream `typeKey`, if any
    #[must_use]
    pub fn type_key(&self) -> Option<&str> {
        self.activity_type
            .as_ref()
            .and_then(|t| t.type_key.as_deref())
            .filter(|key| !key.is_empty())
    }

    /// Parse `startTimeLocal` as a naive wall-clock timestamp
    ///
    /// No timezone math is applied. A bare `YYYY-MM-DD` parses as midnight.
    #[must_use]
    pub fn start_local(&self) -> Option<NaiveDateTime> {
        let raw = self.start_time_local.as_deref()?.trim();
        LOCAL_DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    }

    /// Local calendar date of the start time
    #[must_use]
    pub fn local_date(&self) -> Option<NaiveDate> {
        self.start_local().map(|start| start.date())
    }
}
