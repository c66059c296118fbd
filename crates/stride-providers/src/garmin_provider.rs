// ABOUTME: Garmin Connect activity provider using the activity list and activity detail endpoints
// ABOUTME: Bearer-token requests with 429 backoff; detail summaries are lifted onto the list shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use stride_core::constants::{api_provider_limits, oauth_providers};
use stride_core::models::{Activity, ActivityType, TokenPair};
use tracing::info;

use crate::core::{ActivityProvider, ProviderConfig};
use crate::errors::{ProviderError, ProviderResult};
use crate::http_client::shared_client;
use crate::utils::{self, RetryConfig};

/// Default Garmin Connect API host
pub const DEFAULT_API_BASE_URL: &str = "https://connectapi.garmin.com";

/// Garmin Connect provider
///
/// Holds no per-user state; the bearer token comes from the [`TokenPair`]
/// supplied with each call.
pub struct GarminConnectProvider {
    config: ProviderConfig,
    retry_config: RetryConfig,
    client: Client,
}

impl GarminConnectProvider {
    /// Create a provider against the public Garmin Connect API
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ProviderConfig {
            name: oauth_providers::GARMIN.to_owned(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            token_url: None,
            client_id: None,
            client_secret: None,
        })
    }

    /// Create provider with custom configuration
    #[must_use]
    pub fn with_config(config: ProviderConfig) -> Self {
        Self {
            config,
            retry_config: RetryConfig {
                estimated_block_duration_secs:
                    api_provider_limits::garmin::ESTIMATED_RATE_LIMIT_BLOCK_DURATION_SECS,
                ..RetryConfig::default()
            },
            client: shared_client().clone(),
        }
    }

    /// Replace the 429 retry policy
    #[must_use]
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    /// Provider configuration
    #[must_use]
    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Endpoint for a page of the activity list
    fn activities_endpoint(start: usize, limit: usize) -> String {
        format!("activitylist-service/activities/search/activities?start={start}&limit={limit}")
    }

    async fn api_request<T>(&self, endpoint: &str, tokens: &TokenPair) -> ProviderResult<T>
    where
        T: DeserializeOwned,
    {
        if !tokens.is_complete() {
            return Err(ProviderError::Unauthorized {
                provider: oauth_providers::GARMIN,
            });
        }

        let url = format!(
            "{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );

        utils::api_request_with_retry(
            &self.client,
            &url,
            tokens.bearer(),
            oauth_providers::GARMIN,
            &self.retry_config,
        )
        .await
    }
}

/// Measurements the activity detail endpoint nests under `summaryDTO`
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DetailSummary {
    distance: Option<f64>,
    duration: Option<f64>,
    #[serde(rename = "averageHR")]
    average_hr: Option<f64>,
    calories: Option<f64>,
    start_time_local: Option<String>,
}

/// Lift the detail payload's nested summary and type onto the list shape
///
/// Fields already present at the top level win. The nested objects stay in
/// `extra` so the raw payload is still passed through.
fn flatten_detail(mut activity: Activity) -> ProviderResult<Activity> {
    if let Some(summary) = activity.extra.get("summaryDTO") {
        let summary = DetailSummary::deserialize(summary).map_err(|e| {
            ProviderError::MalformedPayload {
                provider: oauth_providers::GARMIN,
                reason: format!("summaryDTO: {e}"),
            }
        })?;
        activity.distance_meters = activity.distance_meters.or(summary.distance);
        activity.duration_seconds = activity.duration_seconds.or(summary.duration);
        activity.average_heart_rate = activity.average_heart_rate.or(summary.average_hr);
        activity.calories = activity.calories.or(summary.calories);
        activity.start_time_local = activity.start_time_local.or(summary.start_time_local);
    }

    if activity.activity_type.is_none() {
        activity.activity_type = activity
            .extra
            .get("activityTypeDTO")
            .and_then(|dto| dto.get("typeKey"))
            .and_then(|key| key.as_str())
            .map(ActivityType::new);
    }

    Ok(activity)
}

impl Default for GarminConnectProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActivityProvider for GarminConnectProvider {
    fn name(&self) -> &'static str {
        oauth_providers::GARMIN
    }

    async fn fetch_activities(
        &self,
        start: usize,
        limit: usize,
        tokens: &TokenPair,
    ) -> ProviderResult<Vec<Activity>> {
        let limit = limit.clamp(1, api_provider_limits::garmin::MAX_ACTIVITIES_PER_REQUEST);
        let endpoint = Self::activities_endpoint(start, limit);

        let activities: Vec<Activity> = self.api_request(&endpoint, tokens).await?;
        info!(
            provider = oauth_providers::GARMIN,
            start,
            limit,
            count = activities.len(),
            "Fetched activity page"
        );
        Ok(activities)
    }

    async fn fetch_activity_detail(
        &self,
        activity_id: u64,
        tokens: &TokenPair,
    ) -> ProviderResult<Activity> {
        let endpoint = format!("activity-service/activity/{activity_id}");
        let activity = self
            .api_request(&endpoint, tokens)
            .await
            .map_err(|error| match error {
                ProviderError::NotFound { provider, .. } => ProviderError::NotFound {
                    provider,
                    resource: format!("Activity {activity_id}"),
                },
                other => other,
            })?;
        flatten_detail(activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activities_endpoint() {
        assert_eq!(
            GarminConnectProvider::activities_endpoint(20, 10),
            "activitylist-service/activities/search/activities?start=20&limit=10"
        );
    }

    #[test]
    fn test_detail_summary_fills_missing_fields() {
        let activity: Activity = serde_json::from_value(serde_json::json!({
            "activityId": 9,
            "duration": 1800.0,
            "activityTypeDTO": {"typeId": 1, "typeKey": "running"},
            "summaryDTO": {"distance": 6000.0, "duration": 1750.0, "averageHR": 151.0}
        }))
        .unwrap();

        let activity = flatten_detail(activity).unwrap();
        assert_eq!(activity.distance_meters, Some(6000.0));
        assert_eq!(activity.duration_seconds, Some(1800.0));
        assert_eq!(activity.average_heart_rate, Some(151.0));
        assert_eq!(activity.type_key(), Some("running"));
        assert!(activity.extra.contains_key("summaryDTO"));
    }

    #[test]
    fn test_non_object_summary_is_malformed() {
        let activity: Activity =
            serde_json::from_value(serde_json::json!({"summaryDTO": "oops"})).unwrap();
        assert!(matches!(
            flatten_detail(activity),
            Err(ProviderError::MalformedPayload { .. })
        ));
    }

    #[tokio::test]
    async fn test_incomplete_tokens_rejected_without_request() {
        let provider = GarminConnectProvider::new();
        let result = provider
            .fetch_activities(0, 10, &TokenPair::new("", "bearer"))
            .await;
        assert!(matches!(result, Err(ProviderError::Unauthorized { .. })));
    }
}
