// ABOUTME: Groups activities by the local calendar date of their start time
// ABOUTME: Per-day distance totals and representative icon for calendar badges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::NaiveDate;
use stride_core::models::Activity;
use tracing::debug;

use crate::icons::ActivityIcon;

/// Activities keyed by local start date
///
/// Borrows from the fetched activity list; within a date, activities keep
/// the order in which they were supplied.
#[derive(Debug, Clone, Default)]
pub struct CalendarBucket<'a> {
    days: BTreeMap<NaiveDate, Vec<&'a Activity>>,
}

/// Aggregate view of a single date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySummary {
    /// Sum of distances in kilometers
    pub total_distance_km: f64,
    /// Icon of the first activity that covered distance, if any did
    pub representative_icon: Option<ActivityIcon>,
}

impl DaySummary {
    /// Whether the day gets a distance badge and opens a detail view
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.total_distance_km > 0.0
    }
}

impl<'a> CalendarBucket<'a> {
    /// Activities on `date`, empty when none
    #[must_use]
    pub fn activities_on(&self, date: NaiveDate) -> &[&'a Activity] {
        self.days
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Distance total and icon for `date`
    #[must_use]
    pub fn summary(&self, date: NaiveDate) -> DaySummary {
        summarize(self.activities_on(date))
    }

    /// Number of distinct dates
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// True when no activity had a usable start time
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Dates in ascending order with their activities
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[&'a Activity])> + '_ {
        self.days.iter().map(|(date, list)| (*date, list.as_slice()))
    }
}

/// Canonical `YYYY-MM-DD` key for a date
#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Bucket activities by the local date of `startTimeLocal`
///
/// Activities whose start time is missing or unparseable are skipped.
#[must_use]
pub fn group_by_local_date<'a, I>(activities: I) -> CalendarBucket<'a>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut days: BTreeMap<NaiveDate, Vec<&'a Activity>> = BTreeMap::new();
    let mut skipped = 0_usize;

    for activity in activities {
        if let Some(date) = activity.local_date() {
            days.entry(date).or_default().push(activity);
        } else {
            skipped += 1;
        }
    }

    if skipped > 0 {
        debug!(skipped, "Skipped activities without a parseable start time");
    }

    CalendarBucket { days }
}

/// Aggregate a day's activities
///
/// Activities without a `typeKey` still count toward the distance; if the
/// first distance-bearing activity has no key, the default icon is used.
#[must_use]
pub fn summarize(activities: &[&Activity]) -> DaySummary {
    let total_distance_km: f64 = activities.iter().map(|a| a.distance_km()).sum();
    let representative_icon = activities
        .iter()
        .find(|a| a.distance() > 0.0 && a.type_key().is_some())
        .or_else(|| activities.iter().find(|a| a.distance() > 0.0))
        .map(|a| ActivityIcon::from_type_key(a.type_key()));

    DaySummary {
        total_distance_km,
        representative_icon,
    }
}
