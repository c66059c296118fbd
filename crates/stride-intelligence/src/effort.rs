// ABOUTME: Heuristic 0-100 effort score from distance, duration, heart rate, and pace
// ABOUTME: Five display tiers with emoji, localized label, and badge color
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Effort scoring
//!
//! The score is the sum of four banded components:
//!
//! | Component | Range | Bands |
//! |-----------|-------|-------|
//! | Distance (km) | 5-30 | ≥15, ≥10, ≥5, ≥3, ≥1, else |
//! | Duration (min) | 5-25 | ≥90, ≥60, ≥45, ≥30, else |
//! | Heart rate (bpm) | 0-25 | ≥170, ≥150, ≥130, ≥110, >0, else |
//! | Pace (min/km) | 0-20 | ≤4.5, ≤5.5, ≤6.5, ≤7.5, else |
//!
//! Pace only contributes when both distance and duration are positive. Lower
//! bounds are inclusive for distance, duration and heart rate; upper bounds
//! are inclusive for pace.

use serde::Serialize;
use stride_core::models::Activity;

use crate::locale::Locale;

/// Display tier derived from the total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffortTier {
    /// Below 20
    Light,
    /// 20-39
    Good,
    /// 40-59
    Nice,
    /// 60-79
    Strong,
    /// 80 and above
    Extreme,
}

impl EffortTier {
    /// Tier for a total score
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Extreme,
            60..=79 => Self::Strong,
            40..=59 => Self::Nice,
            20..=39 => Self::Good,
            _ => Self::Light,
        }
    }

    /// Badge emoji
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Extreme => "🔥🔥🔥",
            Self::Strong => "🔥🔥",
            Self::Nice => "💪",
            Self::Good => "😊",
            Self::Light => "🙂",
        }
    }

    /// Badge background color as `#RRGGBB`
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Extreme => "#FF3333",
            Self::Strong => "#FF6B6B",
            Self::Nice => "#FF8E53",
            Self::Good => "#FFA500",
            Self::Light => "#FFD93D",
        }
    }

    /// Encouragement message in the given locale
    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Extreme, Locale::Ja) => "超頑張った！",
            (Self::Strong, Locale::Ja) => "頑張った！",
            (Self::Nice, Locale::Ja) => "良い感じ！",
            (Self::Good, Locale::Ja) => "いい運動！",
            (Self::Light, Locale::Ja) => "軽め",
            (Self::Extreme, Locale::En) => "Crushed it!",
            (Self::Strong, Locale::En) => "Strong effort!",
            (Self::Nice, Locale::En) => "Nice work!",
            (Self::Good, Locale::En) => "Good workout!",
            (Self::Light, Locale::En) => "Light",
        }
    }
}

/// Points awarded per component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffortBreakdown {
    /// Distance band points (5-30)
    pub distance: u8,
    /// Duration band points (5-25)
    pub duration: u8,
    /// Heart-rate band points (0-25)
    pub heart_rate: u8,
    /// Pace band points (0-20)
    pub pace: u8,
}

impl EffortBreakdown {
    /// Sum of all components, at most 100
    #[must_use]
    pub const fn total(&self) -> u8 {
        self.distance + self.duration + self.heart_rate + self.pace
    }
}

/// Scored activity with display hints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffortScore {
    /// Total score, 10 to 100 inclusive
    pub score: u8,
    /// Tier derived from `score`
    pub tier: EffortTier,
    /// Badge emoji for `tier`
    pub emoji: &'static str,
    /// Localized message for `tier`
    pub label: &'static str,
    /// Badge color for `tier`
    pub color: &'static str,
    /// Per-component points
    pub breakdown: EffortBreakdown,
}

impl EffortScore {
    fn from_breakdown(breakdown: EffortBreakdown, locale: Locale) -> Self {
        let score = breakdown.total();
        let tier = EffortTier::from_score(score);
        Self {
            score,
            tier,
            emoji: tier.emoji(),
            label: tier.label(locale),
            color: tier.color(),
            breakdown,
        }
    }
}

/// Distance band points for a distance in kilometers
#[must_use]
pub fn distance_points(km: f64) -> u8 {
    if km >= 15.0 {
        30
    } else if km >= 10.0 {
        25
    } else if km >= 5.0 {
        20
    } else if km >= 3.0 {
        15
    } else if km >= 1.0 {
        10
    } else {
        5
    }
}

/// Duration band points for a duration in minutes
#[must_use]
pub fn duration_points(minutes: f64) -> u8 {
    if minutes >= 90.0 {
        25
    } else if minutes >= 60.0 {
        20
    } else if minutes >= 45.0 {
        15
    } else if minutes >= 30.0 {
        10
    } else {
        5
    }
}

/// Heart-rate band points for an average heart rate in bpm
#[must_use]
pub fn heart_rate_points(bpm: f64) -> u8 {
    if bpm >= 170.0 {
        25
    } else if bpm >= 150.0 {
        20
    } else if bpm >= 130.0 {
        15
    } else if bpm >= 110.0 {
        10
    } else if bpm > 0.0 {
        5
    } else {
        0
    }
}

/// Pace band points; `None` when pace is undefined
#[must_use]
pub fn pace_points(min_per_km: Option<f64>) -> u8 {
    match min_per_km {
        Some(pace) if pace <= 4.5 => 20,
        Some(pace) if pace <= 5.5 => 15,
        Some(pace) if pace <= 6.5 => 10,
        Some(pace) if pace <= 7.5 => 5,
        _ => 0,
    }
}

/// Component points for an activity
#[must_use]
pub fn breakdown(activity: &Activity) -> EffortBreakdown {
    let km = activity.distance_km();
    let minutes = activity.duration_minutes();
    let pace = (km > 0.0 && minutes > 0.0).then(|| minutes / km);

    EffortBreakdown {
        distance: distance_points(km),
        duration: duration_points(minutes),
        heart_rate: heart_rate_points(activity.heart_rate()),
        pace: pace_points(pace),
    }
}

/// Score an activity with English labels
///
/// # Examples
///
/// ```rust
/// use stride_core::models::Activity;
/// use stride_intelligence::{score_activity, EffortTier};
///
/// let activity = Activity {
///     distance_meters: Some(10_000.0),
///     duration_seconds: Some(3_000.0),
///     average_heart_rate: Some(155.0),
///     ..Activity::default()
/// };
///
/// // 25 (distance) + 15 (50 minutes) + 20 (heart rate) + 15 (5:00 min/km)
/// let effort = score_activity(&activity);
/// assert_eq!(effort.score, 75);
/// assert_eq!(effort.tier, EffortTier::Strong);
/// ```
#[must_use]
pub fn score_activity(activity: &Activity) -> EffortScore {
    score_activity_localized(activity, Locale::default())
}

/// Score an activity with labels in `locale`
#[must_use]
pub fn score_activity_localized(activity: &Activity, locale: Locale) -> EffortScore {
    EffortScore::from_breakdown(breakdown(activity), locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_are_inclusive() {
        assert_eq!(distance_points(15.0), 30);
        assert_eq!(distance_points(14.999), 25);
        assert_eq!(distance_points(0.999), 5);
        assert_eq!(duration_points(30.0), 10);
        assert_eq!(duration_points(29.9), 5);
        assert_eq!(heart_rate_points(110.0), 10);
        assert_eq!(heart_rate_points(0.5), 5);
        assert_eq!(heart_rate_points(0.0), 0);
        assert_eq!(pace_points(Some(4.5)), 20);
        assert_eq!(pace_points(Some(7.5)), 5);
        assert_eq!(pace_points(Some(7.51)), 0);
        assert_eq!(pace_points(None), 0);
    }

    #[test]
    fn test_empty_activity_scores_minimum() {
        let effort = score_activity(&Activity::default());
        assert_eq!(effort.score, 10);
        assert_eq!(effort.tier, EffortTier::Light);
        assert_eq!(effort.breakdown.pace, 0);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(EffortTier::from_score(100), EffortTier::Extreme);
        assert_eq!(EffortTier::from_score(80), EffortTier::Extreme);
        assert_eq!(EffortTier::from_score(79), EffortTier::Strong);
        assert_eq!(EffortTier::from_score(40), EffortTier::Nice);
        assert_eq!(EffortTier::from_score(20), EffortTier::Good);
        assert_eq!(EffortTier::from_score(19), EffortTier::Light);
    }

    #[test]
    fn test_japanese_labels() {
        let activity = Activity {
            distance_meters: Some(20_000.0),
            duration_seconds: Some(5_400.0),
            average_heart_rate: Some(172.0),
            ..Activity::default()
        };
        let effort = score_activity_localized(&activity, Locale::Ja);
        assert_eq!(effort.label, "超頑張った！");
        assert_eq!(effort.emoji, "🔥🔥🔥");
        assert_eq!(effort.color, "#FF3333");
    }
}
