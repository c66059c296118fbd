// ABOUTME: Presentation models for the list, calendar, and day detail views
// ABOUTME: Turns fetched activities into display-ready cards and month grids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Views
//!
//! Serializable view models built from [`stride_intelligence`] results. The
//! JSON routes return these directly and [`html`] renders the same models as
//! HTML fragments, so the two presentations cannot drift apart.

pub mod html;

use chrono::NaiveDate;
use serde::Serialize;
use stride_core::models::Activity;
use stride_intelligence::{
    build_month_grid, date_key, format_calories, format_day_distance, format_distance_km,
    format_duration, format_heart_rate, format_pace, group_by_local_date,
    score_activity_localized, ActivityIcon, CalendarCell, EffortScore, Locale, MonthOffset,
    MonthRef,
};

/// One activity as shown in the list and day detail views
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCard {
    /// Upstream id, used for the detail link
    pub id: Option<u64>,
    /// Activity name, or a localized placeholder
    pub title: String,
    /// Upstream type key, or a localized placeholder
    pub activity_type: String,
    /// Icon for the type key
    pub icon: ActivityIcon,
    /// Local start as `YYYY-MM-DD HH:MM`
    pub start_time: Option<String>,
    /// Distance in kilometers, two decimals
    pub distance_km: String,
    /// `H:MM:SS` or `M:SS`
    pub duration: String,
    /// Minutes per kilometer as `M:SS`
    pub pace: String,
    /// Average heart rate in bpm
    pub heart_rate: String,
    /// Kilocalories
    pub calories: String,
    /// Effort badge
    pub effort: EffortScore,
}

impl ActivityCard {
    /// Build the card for one activity
    #[must_use]
    pub fn new(activity: &Activity, locale: Locale) -> Self {
        let title = activity
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| locale.untitled_activity())
            .to_owned();
        let activity_type = activity
            .type_key()
            .unwrap_or_else(|| locale.unknown_activity_type())
            .to_owned();

        Self {
            id: activity.id,
            title,
            activity_type,
            icon: ActivityIcon::from_type_key(activity.type_key()),
            start_time: activity
                .start_local()
                .map(|start| start.format("%Y-%m-%d %H:%M").to_string()),
            distance_km: format_distance_km(activity.distance_meters),
            duration: format_duration(activity.duration_seconds),
            pace: format_pace(activity.distance_meters, activity.duration_seconds),
            heart_rate: format_heart_rate(activity.average_heart_rate),
            calories: format_calories(activity.calories),
            effort: score_activity_localized(activity, locale),
        }
    }
}

/// Cards for a slice of activities, order preserved
#[must_use]
pub fn activity_cards(activities: &[Activity], locale: Locale) -> Vec<ActivityCard> {
    activities
        .iter()
        .map(|activity| ActivityCard::new(activity, locale))
        .collect()
}

/// One grid cell as rendered
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCellView {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Day of month
    pub day_number: u32,
    /// -1, 0 or 1 relative to the displayed month
    pub month_offset: MonthOffset,
    /// Whether this is today's cell
    pub is_today: bool,
    /// Whether the cell has a distance badge and opens the day detail
    pub is_active: bool,
    /// Total distance badge such as `12.3km`
    pub distance_label: Option<String>,
    /// Badge icon
    pub icon: Option<ActivityIcon>,
    /// Number of activities started that day
    pub activity_count: usize,
}

impl From<&CalendarCell<'_>> for CalendarCellView {
    fn from(cell: &CalendarCell<'_>) -> Self {
        let is_active = cell.is_active();
        Self {
            date: date_key(cell.date),
            day_number: cell.day_number,
            month_offset: cell.month_offset,
            is_today: cell.is_today,
            is_active,
            distance_label: is_active.then(|| format_day_distance(cell.total_distance_km)),
            icon: cell.representative_icon.filter(|_| is_active),
            activity_count: cell.activities.len(),
        }
    }
}

/// A rendered month
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    /// Localized title, e.g. `February 2024`
    pub title: String,
    /// Displayed month
    pub month: MonthRef,
    /// Sunday-first weekday headers
    pub weekday_headers: [&'static str; 7],
    /// Exactly 42 cells
    pub cells: Vec<CalendarCellView>,
    /// Navigation target for the previous button
    pub previous: MonthRef,
    /// Navigation target for the next button
    pub next: MonthRef,
}

impl MonthView {
    /// Lay out `month` with the activities it should show
    #[must_use]
    pub fn build(month: MonthRef, activities: &[Activity], today: NaiveDate, locale: Locale) -> Self {
        let bucket = group_by_local_date(activities);
        let grid = build_month_grid(month.year(), i64::from(month.month0()), &bucket, today);
        Self {
            title: month.title(locale),
            month,
            weekday_headers: locale.weekday_headers(),
            cells: grid.iter().map(CalendarCellView::from).collect(),
            previous: month.previous(),
            next: month.next(),
        }
    }
}

/// Activities of one active day
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDetailView {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Total distance badge such as `12.3km`
    pub total_distance: String,
    /// Cards in upstream order
    pub activities: Vec<ActivityCard>,
}

impl DayDetailView {
    /// Detail for `date`, or `None` when the day covered no distance
    #[must_use]
    pub fn build(date: NaiveDate, activities: &[Activity], locale: Locale) -> Option<Self> {
        let bucket = group_by_local_date(activities);
        let summary = bucket.summary(date);
        if !summary.is_active() {
            return None;
        }
        Some(Self {
            date: date_key(date),
            total_distance: format_day_distance(summary.total_distance_km),
            activities: bucket
                .activities_on(date)
                .iter()
                .map(|activity| ActivityCard::new(activity, locale))
                .collect(),
        })
    }
}
