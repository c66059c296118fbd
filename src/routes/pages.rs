// ABOUTME: Server-rendered HTML fragments for the calendar and day detail
// ABOUTME: Same data as the JSON view routes, presented as markup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Html,
    routing::get,
    Router,
};
use stride_core::errors::AppError;

use super::require_session;
use super::views::{day_view, month_view, CalendarQuery};
use crate::resources::ServerResources;
use crate::views::html::{render_day, render_month};

/// HTML page routes
pub struct PageRoutes;

impl PageRoutes {
    /// Create all HTML routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/calendar", get(Self::handle_calendar))
            .route("/calendar/day/:date", get(Self::handle_day))
            .with_state(resources)
    }

    async fn handle_calendar(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<CalendarQuery>,
    ) -> Result<Html<String>, AppError> {
        let session = require_session(&headers, &resources)?;
        let (month, _) = month_view(&resources, &session, &query, &headers).await?;
        Ok(Html(render_month(&month)))
    }

    async fn handle_day(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(date): Path<String>,
    ) -> Result<Html<String>, AppError> {
        let session = require_session(&headers, &resources)?;
        let day = day_view(&resources, &session, &date, &headers).await?;
        Ok(Html(render_day(&day)))
    }
}
