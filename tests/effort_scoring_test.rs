// ABOUTME: Integration tests for the effort scorer's bands, tiers, and totals
// ABOUTME: Covers the worked 10 km example, the floor score, and monotonicity per band
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::fixtures::ActivityBuilder;
use stride_intelligence::{score_activity, score_activity_localized, EffortTier, Locale};
use stride_viewer::models::Activity;

#[test]
fn test_ten_km_fifty_minutes_scores_strong() {
    let activity = ActivityBuilder::new()
        .distance_m(10_000.0)
        .duration_s(3000.0)
        .heart_rate(155.0)
        .start("2024-06-01T07:00:00")
        .build();

    let effort = score_activity(&activity);
    assert_eq!(effort.breakdown.distance, 25);
    assert_eq!(effort.breakdown.duration, 15);
    assert_eq!(effort.breakdown.heart_rate, 20);
    assert_eq!(effort.breakdown.pace, 15);
    assert_eq!(effort.score, 75);
    assert_eq!(effort.tier, EffortTier::Strong);
    assert_eq!(effort.emoji, "🔥🔥");
    assert_eq!(effort.color, "#FF6B6B");
}

#[test]
fn test_empty_activity_gets_floor_score() {
    let effort = score_activity(&Activity::default());
    assert_eq!(effort.breakdown.heart_rate, 0);
    assert_eq!(effort.breakdown.pace, 0);
    assert_eq!(effort.score, 10);
    assert_eq!(effort.tier, EffortTier::Light);

    let explicit_zeros = ActivityBuilder::new()
        .distance_m(0.0)
        .duration_s(0.0)
        .heart_rate(0.0)
        .build();
    assert_eq!(score_activity(&explicit_zeros), effort);
}

#[test]
fn test_score_monotonic_in_distance() {
    let mut previous = 0;
    for tenth_km in 5..=200 {
        let activity = ActivityBuilder::new()
            .distance_m(f64::from(tenth_km) * 100.0)
            .heart_rate(140.0)
            .build();
        let score = score_activity(&activity).breakdown.distance;
        assert!(score >= previous, "distance band dropped at {tenth_km}00 m");
        previous = score;
    }
    assert_eq!(previous, 30);
}

#[test]
fn test_score_monotonic_in_duration_and_heart_rate() {
    let mut previous = 0;
    for minutes in 0..=120 {
        let activity = ActivityBuilder::new().duration_s(f64::from(minutes) * 60.0).build();
        let score = score_activity(&activity).score;
        assert!(score >= previous, "score dropped at {minutes} min");
        previous = score;
    }

    let mut previous = 0;
    for bpm in 0..=200 {
        let activity = ActivityBuilder::new().heart_rate(f64::from(bpm)).build();
        let score = score_activity(&activity).score;
        assert!(score >= previous, "score dropped at {bpm} bpm");
        previous = score;
    }
}

#[test]
fn test_faster_pace_never_scores_lower() {
    // Fixed 10 km; shorter durations are faster paces but lower duration points,
    // so only the pace component is compared
    let mut previous = 0;
    for seconds in (2400..=5000).rev().step_by(30) {
        let activity = ActivityBuilder::new()
            .distance_m(10_000.0)
            .duration_s(f64::from(seconds))
            .build();
        let pace = score_activity(&activity).breakdown.pace;
        assert!(pace >= previous, "pace band dropped at {seconds} s");
        previous = pace;
    }
    assert_eq!(previous, 20);
}

#[test]
fn test_tier_boundaries() {
    assert_eq!(EffortTier::from_score(19), EffortTier::Light);
    assert_eq!(EffortTier::from_score(20), EffortTier::Good);
    assert_eq!(EffortTier::from_score(40), EffortTier::Nice);
    assert_eq!(EffortTier::from_score(60), EffortTier::Strong);
    assert_eq!(EffortTier::from_score(80), EffortTier::Extreme);
    assert_eq!(EffortTier::from_score(100), EffortTier::Extreme);
}

#[test]
fn test_maximum_effort() {
    let activity = ActivityBuilder::new()
        .distance_m(21_100.0)
        .duration_s(5400.0)
        .heart_rate(172.0)
        .build();
    let effort = score_activity(&activity);
    assert_eq!(effort.score, 100);
    assert_eq!(effort.tier, EffortTier::Extreme);
}

#[test]
fn test_localized_labels() {
    let activity = ActivityBuilder::new().distance_m(21_100.0).duration_s(5400.0).heart_rate(172.0).build();
    assert_eq!(score_activity_localized(&activity, Locale::Ja).label, "超頑張った！");
    assert_eq!(score_activity_localized(&activity, Locale::En).label, "Crushed it!");
}
