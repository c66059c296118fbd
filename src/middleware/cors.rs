// ABOUTME: CORS middleware configuration for the viewer API
// ABOUTME: Allows browser clients on configured origins to call the JSON endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::environment::ServerConfig;

/// Configure CORS from `CORS_ALLOWED_ORIGINS`
///
/// `*` (or an empty value) allows any origin without credentials. A
/// comma-separated list allows only those origins and lets them send the
/// session cookie.
///
/// ```bash
/// # Any origin (development)
/// export CORS_ALLOWED_ORIGINS="*"
///
/// # Specific origins
/// export CORS_ALLOWED_ORIGINS="https://stride.example.com,http://localhost:5173"
/// ```
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let raw = config.cors.allowed_origins.trim();
    let origins: Vec<HeaderValue> = if raw.is_empty() || raw == "*" {
        Vec::new()
    } else {
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect()
    };

    let layer = CorsLayer::new()
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-request-id"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    if origins.is_empty() {
        layer.allow_origin(AllowOrigin::any())
    } else {
        layer
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
    }
}
