// ABOUTME: Activity fixtures shared by scoring, calendar, and HTTP tests
// ABOUTME: Builders keep test data close to what the upstream service returns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use stride_viewer::models::{Activity, ActivityType};

/// Activity builder with every field unset
#[derive(Default)]
pub struct ActivityBuilder {
    activity: Activity,
}

impl ActivityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: u64) -> Self {
        self.activity.id = Some(id);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.activity.name = Some(name.to_owned());
        self
    }

    pub fn type_key(mut self, key: &str) -> Self {
        self.activity.activity_type = Some(ActivityType::new(key));
        self
    }

    pub fn distance_m(mut self, meters: f64) -> Self {
        self.activity.distance_meters = Some(meters);
        self
    }

    pub fn duration_s(mut self, seconds: f64) -> Self {
        self.activity.duration_seconds = Some(seconds);
        self
    }

    pub fn heart_rate(mut self, bpm: f64) -> Self {
        self.activity.average_heart_rate = Some(bpm);
        self
    }

    pub fn calories(mut self, kcal: f64) -> Self {
        self.activity.calories = Some(kcal);
        self
    }

    pub fn start(mut self, local: &str) -> Self {
        self.activity.start_time_local = Some(local.to_owned());
        self
    }

    /// Upstream field the model does not name
    pub fn upstream_field(mut self, key: &str, value: serde_json::Value) -> Self {
        self.activity.extra.insert(key.to_owned(), value);
        self
    }

    pub fn build(self) -> Activity {
        self.activity
    }
}

/// A run with distance, duration and start time
pub fn run(id: u64, start: &str, meters: f64, seconds: f64) -> Activity {
    ActivityBuilder::new()
        .id(id)
        .name("Morning Run")
        .type_key("running")
        .distance_m(meters)
        .duration_s(seconds)
        .heart_rate(150.0)
        .start(start)
        .build()
}

/// Small history spanning February and March 2024, newest first
pub fn early_2024_history() -> Vec<Activity> {
    vec![
        run(6, "2024-03-02 07:30:00", 10_000.0, 3000.0),
        ActivityBuilder::new()
            .id(5)
            .name("Evening Swim")
            .type_key("lap_swimming")
            .distance_m(1500.0)
            .duration_s(2400.0)
            .start("2024-03-01 18:00:00")
            .build(),
        run(4, "2024-03-01 08:00:00", 5000.0, 1500.0),
        ActivityBuilder::new()
            .id(3)
            .name("Yoga")
            .type_key("yoga")
            .duration_s(3600.0)
            .start("2024-02-28 19:00:00")
            .build(),
        ActivityBuilder::new()
            .id(2)
            .name("Commute")
            .type_key("road_biking")
            .distance_m(12_000.0)
            .duration_s(1800.0)
            .start("2024-02-27 08:15:00")
            .build(),
        run(1, "2024-02-25 07:00:00", 21_100.0, 7200.0),
    ]
}
