// ABOUTME: Route module organization for the viewer's HTTP endpoints
// ABOUTME: Shared session lookup and lenient query parsing used by every route group
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for Stride Viewer
//!
//! Each domain module owns its route definitions and thin handlers. Handlers
//! resolve the caller's session here, call the provider, and hand the data
//! to [`crate::views`].

/// Raw activity endpoints (stateless token mode or session)
pub mod activities;
/// Login, logout and session status
pub mod auth;
/// Liveness endpoint
pub mod health;
/// Server-rendered HTML fragments
pub mod pages;
/// List and calendar view endpoints
pub mod views;

use std::str::FromStr;
use std::sync::Arc;

use http::HeaderMap;
use stride_core::errors::AppError;

use crate::middleware::request_id_from_headers;
use crate::resources::ServerResources;
use crate::session::{session_id_from_headers, Session, SessionLookupError};

pub use activities::ActivityRoutes;
pub use auth::AuthRoutes;
pub use health::HealthRoutes;
pub use pages::PageRoutes;
pub use views::ViewRoutes;

/// Attach the request id, when one was assigned, to an error body
pub(crate) fn tag_request(error: AppError, headers: &HeaderMap) -> AppError {
    match request_id_from_headers(headers) {
        Some(request_id) => error.with_request_id(request_id),
        None => error,
    }
}

/// The caller's live session, if the cookie names one
pub(crate) fn current_session(
    headers: &HeaderMap,
    resources: &ServerResources,
) -> Option<Arc<Session>> {
    session_id_from_headers(headers).and_then(|id| resources.sessions.get(id))
}

/// The caller's live session
///
/// 401 `AUTH_EXPIRED` when the cookie names a session that just timed out,
/// 401 `AUTH_REQUIRED` (`Not logged in`) otherwise.
pub(crate) fn require_session(
    headers: &HeaderMap,
    resources: &ServerResources,
) -> Result<Arc<Session>, AppError> {
    let error = match session_id_from_headers(headers).map(|id| resources.sessions.lookup(id)) {
        Some(Ok(session)) => return Ok(session),
        Some(Err(SessionLookupError::Expired)) => AppError::auth_expired(),
        Some(Err(SessionLookupError::Unknown)) | None => AppError::auth_required("Not logged in"),
    };
    Err(tag_request(error, headers))
}

/// Parse an optional query value, falling back to `default` when absent or malformed
pub(crate) fn parse_or<T: FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Interpret a boolean query flag (`1`, `true`, `yes`)
pub(crate) fn flag(raw: Option<&str>) -> bool {
    raw.is_some_and(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_falls_back() {
        assert_eq!(parse_or(Some("25"), 10_usize), 25);
        assert_eq!(parse_or(Some("abc"), 10_usize), 10);
        assert_eq!(parse_or(Some("-3"), 10_usize), 10);
        assert_eq!(parse_or::<usize>(None, 10), 10);
    }

    #[test]
    fn test_flag() {
        assert!(flag(Some("true")));
        assert!(flag(Some("1")));
        assert!(!flag(Some("no")));
        assert!(!flag(None));
    }
}
