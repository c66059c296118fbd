// ABOUTME: Six-week month grid with adjacent-month overflow days
// ABOUTME: Month references normalize out-of-range months and support navigation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calendar grid builder
//!
//! A month is always rendered as 42 cells (six Sunday-first weeks). Cells
//! before the first of the month belong to the previous month, cells after
//! the last day to the next month. Activity data is looked up by date for
//! every cell, so overflow days still show their totals.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use stride_core::models::Activity;

use crate::aggregation::CalendarBucket;
use crate::icons::ActivityIcon;
use crate::locale::Locale;

/// Cells in a month grid (6 weeks of 7 days)
pub const CALENDAR_CELLS: usize = 42;

/// Years a [`MonthRef`] is clamped to
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// A calendar month, always normalized
///
/// Constructing with an out-of-range month rolls into the adjacent year, so
/// month `-1` of 2024 is December 2023 and month `12` is January 2025.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthRef {
    year: i32,
    month0: u32,
}

impl MonthRef {
    /// Normalize a year and 0-indexed month
    #[must_use]
    pub fn new(year: i32, month0: i64) -> Self {
        let absolute = (i64::from(year) * 12).saturating_add(month0);
        let year = absolute
            .div_euclid(12)
            .clamp(i64::from(MIN_YEAR), i64::from(MAX_YEAR));
        Self {
            year: year as i32,
            month0: absolute.rem_euclid(12) as u32,
        }
    }

    /// Calendar year
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month, 0 for January
    #[must_use]
    pub const fn month0(self) -> u32 {
        self.month0
    }

    /// Month, 1 for January
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month0 + 1
    }

    /// The month before this one
    #[must_use]
    pub fn previous(self) -> Self {
        Self::new(self.year, i64::from(self.month0) - 1)
    }

    /// The month after this one
    #[must_use]
    pub fn next(self) -> Self {
        Self::new(self.year, i64::from(self.month0) + 1)
    }

    /// First day of the month
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month(), 1).unwrap_or_default()
    }

    /// Last day of the month
    ///
    /// Computed from the first day, so December 9999 still ends on the 31st
    /// even though the following month is outside the clamped range.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(first)
    }

    /// Number of days in the month
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        self.last_day().day()
    }

    /// Localized display title
    #[must_use]
    pub fn title(self, locale: Locale) -> String {
        locale.month_title(self.year, self.month0)
    }
}

impl Serialize for MonthRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MonthRef", 2)?;
        state.serialize_field("year", &self.year)?;
        state.serialize_field("month", &self.month())?;
        state.end()
    }
}

/// Which month a grid cell belongs to, relative to the displayed month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthOffset {
    /// Trailing days of the previous month
    Previous,
    /// The displayed month
    Current,
    /// Leading days of the next month
    Next,
}

impl MonthOffset {
    /// Numeric form: -1, 0 or +1
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        match self {
            Self::Previous => -1,
            Self::Current => 0,
            Self::Next => 1,
        }
    }
}

impl Serialize for MonthOffset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_i8())
    }
}

/// One day in the month grid
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell<'a> {
    /// The day this cell represents
    pub date: NaiveDate,
    /// Day of month shown in the cell
    pub day_number: u32,
    /// Month the day belongs to
    pub month_offset: MonthOffset,
    /// Whether `date` is today
    pub is_today: bool,
    /// Sum of the day's distances in kilometers
    pub total_distance_km: f64,
    /// Badge icon when the day has distance
    pub representative_icon: Option<ActivityIcon>,
    /// Activities started on `date`, upstream order
    pub activities: Vec<&'a Activity>,
}

impl CalendarCell<'_> {
    /// Whether the cell shows a distance badge and opens a detail view
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.total_distance_km > 0.0
    }
}

/// Build the 42-cell grid for `year` and 0-indexed `month0`
///
/// `month0` outside `0..12` is normalized like [`MonthRef::new`]. `today`
/// marks the cell with the matching date, whichever month it falls in.
#[must_use]
pub fn build_month_grid<'a>(
    year: i32,
    month0: i64,
    bucket: &CalendarBucket<'a>,
    today: NaiveDate,
) -> Vec<CalendarCell<'a>> {
    let month = MonthRef::new(year, month0);
    let first = month.first_day();
    let last = month.last_day();
    let first_weekday = u64::from(first.weekday().num_days_from_sunday());
    let start = first
        .checked_sub_days(Days::new(first_weekday))
        .unwrap_or(first);

    start
        .iter_days()
        .take(CALENDAR_CELLS)
        .map(|date| {
            let month_offset = if date < first {
                MonthOffset::Previous
            } else if date > last {
                MonthOffset::Next
            } else {
                MonthOffset::Current
            };
            let activities = bucket.activities_on(date).to_vec();
            let summary = bucket.summary(date);
            CalendarCell {
                date,
                day_number: date.day(),
                month_offset,
                is_today: date == today,
                total_distance_km: summary.total_distance_km,
                representative_icon: summary.representative_icon,
                activities,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_month_normalization() {
        assert_eq!(MonthRef::new(2024, -1), MonthRef::new(2023, 11));
        assert_eq!(MonthRef::new(2024, 12), MonthRef::new(2025, 0));
        assert_eq!(MonthRef::new(2024, 0).previous().year(), 2023);
        assert_eq!(MonthRef::new(2024, 11).next().month(), 1);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(MonthRef::new(2024, 1).days_in_month(), 29);
        assert_eq!(MonthRef::new(2023, 1).days_in_month(), 28);
        assert_eq!(MonthRef::new(2024, 11).days_in_month(), 31);
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_leading_cells() {
        // September 2024 starts on a Sunday
        let grid = build_month_grid(2024, 8, &CalendarBucket::default(), ymd(2024, 9, 15));
        assert_eq!(grid.len(), CALENDAR_CELLS);
        assert_eq!(grid[0].date, ymd(2024, 9, 1));
        assert_eq!(grid[0].month_offset, MonthOffset::Current);
        assert!(grid[14].is_today);
        assert_eq!(grid[41].month_offset, MonthOffset::Next);
    }

    #[test]
    fn test_overflow_offsets_at_year_range_edges() {
        // January 0001 starts on a Monday, so one leading day falls in year 0
        let grid = build_month_grid(1, 0, &CalendarBucket::default(), ymd(1, 1, 1));
        assert_eq!(grid[0].date, ymd(0, 12, 31));
        assert_eq!(grid[0].month_offset, MonthOffset::Previous);
        assert_eq!(grid[1].month_offset, MonthOffset::Current);

        // December 9999 spills into year 10000
        let grid = build_month_grid(9999, 11, &CalendarBucket::default(), ymd(9999, 12, 1));
        assert_eq!(MonthRef::new(9999, 11).days_in_month(), 31);
        assert_eq!(grid[41].date.year(), 10_000);
        assert_eq!(grid[41].month_offset, MonthOffset::Next);
        let current = grid
            .iter()
            .filter(|cell| cell.month_offset == MonthOffset::Current)
            .count();
        assert_eq!(current, 31);
    }

    #[test]
    fn test_month_offset_serializes_as_number() {
        let json = serde_json::to_string(&MonthOffset::Previous).unwrap();
        assert_eq!(json, "-1");
    }
}
