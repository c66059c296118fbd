// ABOUTME: Raw activity routes returning upstream activities unchanged
// ABOUTME: Authenticates with a tokens query parameter or the session cookie
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use stride_core::constants::paging;
use stride_core::errors::AppError;
use stride_core::models::{Activity, TokenPair};
use tracing::{debug, warn};

use super::{parse_or, require_session, tag_request};
use crate::resources::ServerResources;

/// Query for the raw activity list
///
/// Values are kept as strings so malformed numbers fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActivitiesQuery {
    /// Number of activities to skip
    pub start: Option<String>,
    /// Page size, clamped to `1..=100`
    pub limit: Option<String>,
    /// JSON-encoded [`TokenPair`] for stateless clients
    pub tokens: Option<String>,
}

/// Query for a single activity
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActivityDetailQuery {
    /// JSON-encoded [`TokenPair`] for stateless clients
    pub tokens: Option<String>,
}

/// Raw activity page
#[derive(Debug, Serialize)]
pub struct ActivitiesResponse {
    /// Always true
    pub success: bool,
    /// Offset the page starts at
    pub start: usize,
    /// Requested page size after clamping
    pub limit: usize,
    /// Activities as delivered upstream
    pub activities: Vec<Activity>,
}

/// Single raw activity
#[derive(Debug, Serialize)]
pub struct ActivityDetailResponse {
    /// Always true
    pub success: bool,
    /// Activity as delivered upstream
    pub activity: Activity,
}

/// Raw activity routes
pub struct ActivityRoutes;

impl ActivityRoutes {
    /// Create all raw activity routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/activities", get(Self::handle_list))
            .route("/api/activity/:id", get(Self::handle_detail))
            .with_state(resources)
    }

    /// Tokens from the query when supplied, otherwise from the session
    fn resolve_tokens(
        raw_tokens: Option<&str>,
        headers: &HeaderMap,
        resources: &ServerResources,
    ) -> Result<TokenPair, AppError> {
        if let Some(raw) = raw_tokens {
            let tokens = TokenPair::from_query_json(raw);
            if tokens.is_complete() {
                return Ok(tokens);
            }
            debug!("Rejecting incomplete tokens query parameter");
            return Err(tag_request(AppError::auth_required("Tokens required"), headers));
        }

        require_session(headers, resources).map(|session| session.tokens().clone())
    }

    /// Handle raw activity page
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ActivitiesQuery>,
    ) -> Result<Json<ActivitiesResponse>, AppError> {
        let tokens = Self::resolve_tokens(query.tokens.as_deref(), &headers, &resources)?;
        let start = parse_or(query.start.as_deref(), 0_usize);
        let limit = parse_or(query.limit.as_deref(), paging::DEFAULT_PAGE_SIZE)
            .clamp(1, paging::MAX_PAGE_SIZE);

        let activities = resources
            .provider
            .fetch_activities(start, limit, &tokens)
            .await
            .map_err(|e| {
                warn!(kind = ?e.kind(), error = %e, start, limit, "Activity fetch failed");
                tag_request(AppError::from(e), &headers)
            })?;

        Ok(Json(ActivitiesResponse {
            success: true,
            start,
            limit,
            activities,
        }))
    }

    /// Handle single activity
    async fn handle_detail(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Query(query): Query<ActivityDetailQuery>,
    ) -> Result<Json<ActivityDetailResponse>, AppError> {
        let tokens = Self::resolve_tokens(query.tokens.as_deref(), &headers, &resources)?;
        let activity_id: u64 = id.trim().parse().map_err(|_| {
            tag_request(
                AppError::invalid_input(format!("Invalid activity id: {id}")),
                &headers,
            )
        })?;

        let activity = resources
            .provider
            .fetch_activity_detail(activity_id, &tokens)
            .await
            .map_err(|e| {
                warn!(kind = ?e.kind(), error = %e, activity_id, "Activity detail fetch failed");
                tag_request(AppError::from(e), &headers)
            })?;

        Ok(Json(ActivityDetailResponse {
            success: true,
            activity,
        }))
    }
}
