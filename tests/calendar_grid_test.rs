// ABOUTME: Integration tests for date grouping and the 42-cell month grid
// ABOUTME: Checks leading and trailing days against known calendars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use chrono::NaiveDate;
use helpers::fixtures::{early_2024_history, run, ActivityBuilder};
use stride_intelligence::{
    build_month_grid, date_key, group_by_local_date, ActivityIcon, CalendarBucket, MonthOffset,
    CALENDAR_CELLS,
};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn test_same_day_activities_share_a_bucket_in_order() {
    let activities = vec![
        run(1, "2024-03-01T08:00", 5000.0, 1500.0),
        run(2, "2024-03-01T18:00", 3000.0, 1000.0),
    ];
    let bucket = group_by_local_date(&activities);

    assert_eq!(bucket.len(), 1);
    let (date, day) = bucket.iter().next().unwrap();
    assert_eq!(date_key(date), "2024-03-01");
    let ids: Vec<_> = day.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2)]);
}

#[test]
fn test_unparseable_start_times_are_skipped() {
    let activities = vec![
        ActivityBuilder::new().id(1).distance_m(1000.0).build(),
        ActivityBuilder::new().id(2).start("sometime").build(),
        run(3, "2024-03-01 08:00:00", 5000.0, 1500.0),
    ];
    let bucket = group_by_local_date(&activities);
    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket.activities_on(ymd(2024, 3, 1)).len(), 1);
}

#[test]
fn test_day_summary_icon_and_total() {
    let activities = early_2024_history();
    let bucket = group_by_local_date(&activities);

    let summary = bucket.summary(ymd(2024, 3, 1));
    assert!((summary.total_distance_km - 6.5).abs() < 1e-9);
    assert_eq!(summary.representative_icon, Some(ActivityIcon::Swim));

    let rest = bucket.summary(ymd(2024, 2, 28));
    assert!(!rest.is_active());
    assert_eq!(rest.representative_icon, None);
}

#[test]
fn test_february_2024_grid() {
    let bucket = CalendarBucket::default();
    let grid = build_month_grid(2024, 1, &bucket, ymd(2024, 2, 29));

    assert_eq!(grid.len(), CALENDAR_CELLS);
    let leading: Vec<_> = grid.iter().take(4).map(|c| c.day_number).collect();
    assert_eq!(leading, vec![28, 29, 30, 31]);
    assert!(grid[..4].iter().all(|c| c.month_offset == MonthOffset::Previous));
    assert_eq!(grid[4].date, ymd(2024, 2, 1));
    assert_eq!(grid[4].month_offset, MonthOffset::Current);

    let leap_day = &grid[32];
    assert_eq!(leap_day.date, ymd(2024, 2, 29));
    assert!(leap_day.is_today);

    assert!(grid[33..].iter().all(|c| c.month_offset == MonthOffset::Next));
    assert_eq!(grid[41].date, ymd(2024, 3, 9));
}

#[test]
fn test_month_starting_on_sunday_has_no_leading_days() {
    // September 2024 begins on a Sunday
    let grid = build_month_grid(2024, 8, &CalendarBucket::default(), ymd(2024, 1, 1));
    assert_eq!(grid[0].date, ymd(2024, 9, 1));
    assert_eq!(grid[0].month_offset, MonthOffset::Current);
    assert_eq!(grid.len(), 42);
}

#[test]
fn test_grid_always_has_42_cells() {
    let bucket = CalendarBucket::default();
    for year in [1999, 2015, 2024, 2100] {
        for month0 in 0..12 {
            assert_eq!(build_month_grid(year, month0, &bucket, ymd(2024, 1, 1)).len(), 42);
        }
    }
}

#[test]
fn test_adjacent_month_cells_carry_activities() {
    let activities = early_2024_history();
    let bucket = group_by_local_date(&activities);
    let grid = build_month_grid(2024, 2, &bucket, ymd(2024, 3, 2));

    let feb_25 = grid.iter().find(|c| c.date == ymd(2024, 2, 25)).unwrap();
    assert_eq!(feb_25.month_offset, MonthOffset::Previous);
    assert!(feb_25.is_active());
    assert_eq!(feb_25.representative_icon, Some(ActivityIcon::Run));

    let commute = grid.iter().find(|c| c.date == ymd(2024, 2, 27)).unwrap();
    assert_eq!(commute.representative_icon, Some(ActivityIcon::Cycle));
}
