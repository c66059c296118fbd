// ABOUTME: Garmin provider and password-grant tests against a local fake upstream
// ABOUTME: Exercises paging, status mapping, 429 retries, and malformed payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use stride_providers::{
    ActivityProvider, AuthError, Authenticator, GarminConnectProvider, PasswordGrantAuthenticator,
    ProviderConfig, ProviderErrorKind, RetryConfig,
};
use stride_viewer::models::TokenPair;
use tokio::net::TcpListener;

const GOOD_BEARER: &str = "good-bearer";

async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {GOOD_BEARER}"))
}

async fn activity_page(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, usize>>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let start = params.get("start").copied().unwrap_or(0);
    let limit = params.get("limit").copied().unwrap_or(10);
    let page: Vec<_> = (start..start + limit)
        .filter(|i| *i < 3)
        .map(|i| {
            json!({
                "activityId": 100 + i,
                "activityName": format!("Run {i}"),
                "activityType": {"typeId": 1, "typeKey": "running", "parentTypeId": 17},
                "distance": 5000.0,
                "duration": 1500.0,
                "averageHR": 148.0,
                "calories": 350.0,
                "startTimeLocal": format!("2024-03-0{} 07:00:00", i + 1),
                "startTimeGMT": format!("2024-03-0{} 06:00:00", i + 1),
                "elevationGain": 42.0
            })
        })
        .collect();
    Json(page).into_response()
}

async fn activity_detail(headers: HeaderMap, Path(id): Path<u64>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id == 100 {
        Json(json!({
            "activityId": 100,
            "activityName": "Run 0",
            "activityTypeDTO": {"typeId": 1, "typeKey": "running"},
            "summaryDTO": {
                "startTimeLocal": "2024-03-01T07:00:00.0",
                "distance": 5000.0,
                "duration": 1500.0,
                "averageHR": 148.0,
                "calories": 350.0
            }
        }))
        .into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

fn garmin_router() -> Router {
    Router::new()
        .route(
            "/activitylist-service/activities/search/activities",
            get(activity_page),
        )
        .route("/activity-service/activity/:id", get(activity_detail))
}

fn provider_for(base_url: String) -> GarminConnectProvider {
    GarminConnectProvider::with_config(ProviderConfig {
        name: "garmin".to_owned(),
        api_base_url: base_url,
        token_url: None,
        client_id: None,
        client_secret: None,
    })
    .with_retry_config(RetryConfig {
        max_retries: 3,
        initial_backoff_ms: 5,
        ..RetryConfig::default()
    })
}

fn good_tokens() -> TokenPair {
    TokenPair::new("long-lived", GOOD_BEARER)
}

#[tokio::test]
async fn test_fetch_activity_pages() {
    let provider = provider_for(spawn_upstream(garmin_router()).await);

    let first = provider.fetch_activities(0, 2, &good_tokens()).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].id, Some(100));
    assert_eq!(first[0].type_key(), Some("running"));
    assert!((first[0].heart_rate() - 148.0).abs() < f64::EPSILON);
    assert_eq!(
        first[1].local_date(),
        chrono::NaiveDate::from_ymd_opt(2024, 3, 2)
    );

    let rest = provider.fetch_activities(2, 2, &good_tokens()).await.unwrap();
    assert_eq!(rest.len(), 1);
}

#[tokio::test]
async fn test_rejected_and_missing_tokens() {
    let provider = provider_for(spawn_upstream(garmin_router()).await);

    let error = provider
        .fetch_activities(0, 10, &TokenPair::new("a", "stale-bearer"))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ProviderErrorKind::Unauthorized);

    let error = provider
        .fetch_activities(0, 10, &TokenPair::default())
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ProviderErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_activity_detail() {
    let provider = provider_for(spawn_upstream(garmin_router()).await);

    let activity = provider.fetch_activity_detail(100, &good_tokens()).await.unwrap();
    assert_eq!(activity.name.as_deref(), Some("Run 0"));
    assert_eq!(activity.type_key(), Some("running"));
    assert!((activity.distance_km() - 5.0).abs() < f64::EPSILON);
    assert!((activity.heart_rate() - 148.0).abs() < f64::EPSILON);
    assert_eq!(
        activity.local_date(),
        chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
    );

    let error = provider
        .fetch_activity_detail(7, &good_tokens())
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ProviderErrorKind::NotFound);
    assert!(error.to_string().contains("Activity 7"));
}

#[tokio::test]
async fn test_rate_limit_retries_then_gives_up() {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route(
            "/activitylist-service/activities/search/activities",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                StatusCode::TOO_MANY_REQUESTS
            }),
        )
        .with_state(Arc::clone(&hits));
    let provider = provider_for(spawn_upstream(router).await);

    let error = provider
        .fetch_activities(0, 10, &good_tokens())
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ProviderErrorKind::RateLimited);
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_malformed_payload() {
    let router = Router::new().route(
        "/activitylist-service/activities/search/activities",
        get(|| async { "<html>maintenance</html>" }),
    );
    let provider = provider_for(spawn_upstream(router).await);

    let error = provider
        .fetch_activities(0, 10, &good_tokens())
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ProviderErrorKind::MalformedPayload);
}

async fn token_endpoint(Form(form): Form<HashMap<String, String>>) -> Response {
    let valid = form.get("grant_type").map(String::as_str) == Some("password")
        && form.get("username").map(String::as_str) == Some("runner@example.com")
        && form.get("password").map(String::as_str) == Some("hunter2")
        && form.get("client_id").map(String::as_str) == Some("stride");
    if valid {
        Json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "expires_in": 3600,
            "token_type": "Bearer"
        }))
        .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid_grant"}))).into_response()
    }
}

#[tokio::test]
async fn test_password_grant_login() {
    let base = spawn_upstream(Router::new().route("/oauth/token", post(token_endpoint))).await;
    let authenticator = PasswordGrantAuthenticator::from_config(&ProviderConfig {
        name: "garmin".to_owned(),
        api_base_url: base.clone(),
        token_url: Some(format!("{base}/oauth/token")),
        client_id: Some("stride".to_owned()),
        client_secret: None,
    })
    .unwrap();

    let tokens = authenticator.login("runner@example.com", "hunter2").await.unwrap();
    assert_eq!(tokens, TokenPair::new("refresh-1", "access-1"));

    let error = authenticator
        .login("runner@example.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(error, AuthError::InvalidCredentials));
}
