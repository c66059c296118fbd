// ABOUTME: Request tracing helpers for correlation ids and structured HTTP spans
// ABOUTME: Used by the tower-http trace layer and by handlers tagging error bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::extract::Request;
use http::HeaderMap;
use tracing::Span;

/// Header carrying the request id, set by `SetRequestIdLayer`
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id assigned to this request, if any
#[must_use]
pub fn request_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Create the tracing span for an HTTP request
pub fn make_request_span(request: &Request) -> Span {
    let request_id = request_id_from_headers(request.headers()).unwrap_or_default();
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
