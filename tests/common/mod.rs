// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, synthetic server resources, and login helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `stride_viewer`

use std::sync::{Arc, Once};

use axum::Router;
use stride_providers::demo_account;
use stride_viewer::config::environment::ServerConfig;
use stride_viewer::models::Activity;
use stride_viewer::resources::ServerResources;
use stride_viewer::server::build_router;

use crate::helpers::axum_test::AxumTestRequest;

pub const TEST_USER: &str = "runner@example.com";
pub const TEST_PASSWORD: &str = "correct horse";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls verbosity, WARN by default
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Resources serving `activities` to the test account
pub fn synthetic_resources(activities: Vec<Activity>) -> Arc<ServerResources> {
    synthetic_resources_with(ServerConfig::default(), activities)
}

/// Like [`synthetic_resources`] with explicit configuration
pub fn synthetic_resources_with(
    config: ServerConfig,
    activities: Vec<Activity>,
) -> Arc<ServerResources> {
    init_test_logging();
    let (authenticator, provider) = demo_account(TEST_USER, TEST_PASSWORD, activities);
    Arc::new(
        ServerResources::new(
            config,
            Arc::new(provider),
            Arc::new(authenticator),
        )
        .unwrap(),
    )
}

/// Full router over `activities`
pub fn test_app(activities: Vec<Activity>) -> Router {
    build_router(synthetic_resources(activities))
}

/// Log in as the test account, returning the `stride_session=...` pair
pub async fn login(app: &Router) -> String {
    let response = AxumTestRequest::post("/api/login")
        .json(&serde_json::json!({"email": TEST_USER, "password": TEST_PASSWORD}))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    response.cookie_pair().expect("login sets a session cookie")
}
