// ABOUTME: List and calendar view routes backed by per-session activity state
// ABOUTME: Sequences fetches so only the latest response updates a session
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
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use stride_core::constants::paging;
use stride_core::errors::AppError;
use stride_core::models::Activity;
use stride_intelligence::MonthRef;
use tracing::{debug, warn};

use super::{flag, parse_or, require_session, tag_request};
use crate::resources::ServerResources;
use crate::session::{CommitOutcome, Session};
use crate::views::{activity_cards, ActivityCard, DayDetailView, MonthView};

/// Query for the list view
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Offset; 0 reloads the list, anything else appends ("load more")
    pub start: Option<String>,
    /// Page size, clamped to `1..=100`
    pub limit: Option<String>,
}

/// Query for the calendar view
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CalendarQuery {
    /// Four-digit year, defaults to today's
    pub year: Option<String>,
    /// 1-based month, defaults to today's; out-of-range values roll over
    pub month: Option<String>,
    /// Override for today's date (`YYYY-MM-DD`)
    pub today: Option<String>,
    /// Refetch the calendar window even if the session holds one
    pub refresh: Option<String>,
}

/// One page of the list view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    /// Always true
    pub success: bool,
    /// Offset of this page
    pub start: usize,
    /// Cards for this page only
    pub activities: Vec<ActivityCard>,
    /// Activities now held for the list, `None` when this page was stale
    pub loaded: Option<usize>,
    /// Whether another page may exist
    pub has_more: bool,
    /// Whether a newer list fetch superseded this one
    pub stale: bool,
}

/// The calendar view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    /// Always true
    pub success: bool,
    /// Whether a newer calendar fetch superseded this one
    pub stale: bool,
    /// Grid and navigation
    #[serde(flatten)]
    pub month: MonthView,
}

/// One day's activities
#[derive(Debug, Serialize)]
pub struct DayResponse {
    /// Always true
    pub success: bool,
    /// Cards for the day
    #[serde(flatten)]
    pub day: DayDetailView,
}

/// View routes
pub struct ViewRoutes;

impl ViewRoutes {
    /// Create all JSON view routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/list", get(Self::handle_list))
            .route("/api/calendar", get(Self::handle_calendar))
            .route("/api/calendar/day/:date", get(Self::handle_day))
            .with_state(resources)
    }

    /// Handle the list view
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListQuery>,
    ) -> Result<Json<ListResponse>, AppError> {
        let session = require_session(&headers, &resources)?;
        let start = parse_or(query.start.as_deref(), 0_usize);
        let limit = parse_or(query.limit.as_deref(), resources.config.display.list_page_size)
            .clamp(1, paging::MAX_PAGE_SIZE);

        let ticket = session.begin_list_fetch();
        let page = resources
            .provider
            .fetch_activities(start, limit, session.tokens())
            .await
            .map_err(|e| {
                warn!(session = %session.id(), kind = ?e.kind(), error = %e, "List fetch failed");
                tag_request(AppError::from(e), &headers)
            })?;

        let activities = activity_cards(&page, resources.config.display.locale);
        let has_more = page.len() >= limit;
        let outcome = session.commit_list(ticket, page, start > 0).await;
        let loaded = match outcome {
            CommitOutcome::Committed { total } => Some(total),
            CommitOutcome::Stale => None,
        };

        Ok(Json(ListResponse {
            success: true,
            start,
            activities,
            loaded,
            has_more,
            stale: outcome.is_stale(),
        }))
    }

    /// Handle the calendar view
    async fn handle_calendar(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<CalendarQuery>,
    ) -> Result<Json<CalendarResponse>, AppError> {
        let session = require_session(&headers, &resources)?;
        let (month, stale) = month_view(&resources, &session, &query, &headers).await?;
        Ok(Json(CalendarResponse {
            success: true,
            stale,
            month,
        }))
    }

    /// Handle a day detail
    async fn handle_day(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(date): Path<String>,
    ) -> Result<Json<DayResponse>, AppError> {
        let session = require_session(&headers, &resources)?;
        let day = day_view(&resources, &session, &date, &headers).await?;
        Ok(Json(DayResponse { success: true, day }))
    }
}

/// Today's date, or the `today` override when it parses
pub(crate) fn resolve_today(raw: Option<&str>) -> NaiveDate {
    raw.and_then(|value| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok())
        .unwrap_or_else(|| Local::now().date_naive())
}

/// Month named by the query, defaulting to the month containing `today`
pub(crate) fn resolve_month(query: &CalendarQuery, today: NaiveDate) -> MonthRef {
    let year = parse_or(query.year.as_deref(), today.year());
    let month = parse_or(query.month.as_deref(), i64::from(today.month()));
    MonthRef::new(year, month.saturating_sub(1))
}

/// Build the calendar for the query, fetching the window when needed
pub(crate) async fn month_view(
    resources: &ServerResources,
    session: &Session,
    query: &CalendarQuery,
    headers: &HeaderMap,
) -> Result<(MonthView, bool), AppError> {
    let today = resolve_today(query.today.as_deref());
    let month = resolve_month(query, today);
    let locale = resources.config.display.locale;
    with_calendar_activities(resources, session, flag(query.refresh.as_deref()), headers, |activities| {
        MonthView::build(month, activities, today, locale)
    })
    .await
}

/// Build the detail for a `YYYY-MM-DD` path segment
///
/// Days with no distance have no detail view and answer 404.
pub(crate) async fn day_view(
    resources: &ServerResources,
    session: &Session,
    raw_date: &str,
    headers: &HeaderMap,
) -> Result<DayDetailView, AppError> {
    let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d").map_err(|_| {
        tag_request(
            AppError::invalid_input(format!("Invalid date '{raw_date}', expected YYYY-MM-DD")),
            headers,
        )
    })?;
    let locale = resources.config.display.locale;
    let (day, _) = with_calendar_activities(resources, session, false, headers, |activities| {
        DayDetailView::build(date, activities, locale)
    })
    .await?;
    day.ok_or_else(|| tag_request(AppError::not_found(format!("Activities on {date}")), headers))
}

/// Run `render` over the session's calendar window
///
/// The window is fetched when the session has none or `refresh` is set. A
/// fetch that was superseded while in flight is still rendered for this
/// response but not stored; the returned flag reports that.
async fn with_calendar_activities<R>(
    resources: &ServerResources,
    session: &Session,
    refresh: bool,
    headers: &HeaderMap,
    render: impl FnOnce(&[Activity]) -> R,
) -> Result<(R, bool), AppError> {
    if !refresh {
        let view = session.view().await;
        if let Some(activities) = view.calendar.as_deref() {
            return Ok((render(activities), false));
        }
    }

    let ticket = session.begin_calendar_fetch();
    let limit = resources.config.display.calendar_fetch_limit;
    let fetched = resources
        .provider
        .fetch_activities(0, limit, session.tokens())
        .await
        .map_err(|e| {
            warn!(session = %session.id(), kind = ?e.kind(), error = %e, "Calendar fetch failed");
            tag_request(AppError::from(e), headers)
        })?;
    debug!(session = %session.id(), count = fetched.len(), "Calendar window fetched");

    let rendered = render(&fetched);
    let outcome = session.commit_calendar(ticket, fetched).await;
    Ok((rendered, outcome.is_stale()))
}
