// ABOUTME: Login, logout, and session status routes
// ABOUTME: Creates per-login sessions and manages the session cookie
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use stride_core::errors::AppError;
use stride_core::models::TokenPair;
use tracing::{info, warn};

use super::{current_session, tag_request};
use crate::resources::ServerResources;
use crate::session::{expired_session_cookie, session_cookie, session_id_from_headers};

/// Login request body
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Account identifier
    pub email: Option<String>,
    /// Account password
    pub password: Option<String>,
}

/// Login response body
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Always true
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
    /// Issued tokens, for clients that cache them
    pub tokens: TokenPair,
}

/// Logout response body
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Always true
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
}

/// Session status response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Whether the cookie names a live session
    pub logged_in: bool,
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/login", post(Self::handle_login))
            .route("/api/logout", post(Self::handle_logout))
            .route("/api/status", get(Self::handle_status))
            .with_state(resources)
    }

    /// Handle login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let email = request
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or_else(|| tag_request(AppError::missing_field("email"), &headers))?;
        let password = request
            .password
            .as_deref()
            .filter(|password| !password.is_empty())
            .ok_or_else(|| tag_request(AppError::missing_field("password"), &headers))?;

        let tokens = resources
            .authenticator
            .login(email, password)
            .await
            .map_err(|e| {
                warn!(authenticator = resources.authenticator.name(), error = %e, "Login failed");
                tag_request(AppError::from(e), &headers)
            })?;

        // A fresh login replaces whatever session the browser held
        if let Some(previous) = session_id_from_headers(&headers)
            .and_then(|id| resources.sessions.remove(id))
        {
            resources.authenticator.revoke(previous.tokens()).await;
        }
        let session = resources.sessions.create(tokens.clone());
        info!(session = %session.id(), "Login succeeded");

        let cookie = session_cookie(
            session.id(),
            resources.config.session_ttl_secs(),
            resources.config.session.cookie_secure,
        );
        let body = LoginResponse {
            success: true,
            message: "Login successful".to_owned(),
            tokens,
        };
        Ok((StatusCode::OK, [(SET_COOKIE, cookie)], Json(body)).into_response())
    }

    /// Handle logout
    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Response {
        if let Some(session) =
            session_id_from_headers(&headers).and_then(|id| resources.sessions.remove(id))
        {
            resources.authenticator.revoke(session.tokens()).await;
        }
        let cookie = expired_session_cookie(resources.config.session.cookie_secure);
        let body = LogoutResponse {
            success: true,
            message: "Logged out".to_owned(),
        };
        (StatusCode::OK, [(SET_COOKIE, cookie)], Json(body)).into_response()
    }

    /// Handle session status
    async fn handle_status(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Json<StatusResponse> {
        Json(StatusResponse {
            logged_in: current_session(&headers, &resources).is_some(),
        })
    }
}
