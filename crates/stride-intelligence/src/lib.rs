// ABOUTME: Pure activity analysis core: effort scoring, formatting, and calendar layout
// ABOUTME: Synchronous, allocation-light functions with no I/O and no failure modes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stride Intelligence
//!
//! Everything in this crate is a pure function of its inputs. Missing
//! activity fields are read as zero, so none of these operations can fail.
//!
//! ## Modules
//!
//! - **effort**: 0-100 effort score with a display tier
//! - **formatters**: Duration, pace and card statistic strings
//! - **aggregation**: Group activities by local calendar date
//! - **calendar**: Fixed 42-cell month grid
//! - **icons**: Activity-type icon selection
//! - **locale**: Display language for labels and titles

/// Group activities by local calendar date
pub mod aggregation;
/// Six-week month grid builder
pub mod calendar;
/// Heuristic effort scoring
pub mod effort;
/// Display string formatters
pub mod formatters;
/// Activity-type icons
pub mod icons;
/// Display locale
pub mod locale;

pub use aggregation::{date_key, group_by_local_date, summarize, CalendarBucket, DaySummary};
pub use calendar::{build_month_grid, CalendarCell, MonthOffset, MonthRef, CALENDAR_CELLS};
pub use effort::{score_activity, score_activity_localized, EffortBreakdown, EffortScore, EffortTier};
pub use formatters::{
    format_calories, format_day_distance, format_distance_km, format_duration, format_heart_rate,
    format_pace,
};
pub use icons::ActivityIcon;
pub use locale::Locale;
