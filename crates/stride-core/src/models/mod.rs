// ABOUTME: Data models shared by providers, the scoring core, and the HTTP layer
// ABOUTME: Activity as delivered upstream and the opaque token pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod activity;
mod tokens;

pub use activity::{Activity, ActivityType};
pub use tokens::TokenPair;
