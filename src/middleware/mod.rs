// ABOUTME: HTTP middleware for cross-origin access and request tracing
// ABOUTME: Builds the CORS layer and the per-request span carrying the request id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod cors;
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing
pub use tracing::{make_request_span, request_id_from_headers, REQUEST_ID_HEADER};
