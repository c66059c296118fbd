// ABOUTME: Shared request helpers for provider implementations
// ABOUTME: Authenticated GET with 429 backoff and the OAuth2 password-grant token exchange
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::errors::{AuthError, ProviderError, ProviderResult};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts made before giving up, including the first
    pub max_retries: u32,
    /// Backoff before the first retry; doubles on each further retry
    pub initial_backoff_ms: u64,
    /// HTTP status codes that should trigger retries
    pub retryable_status_codes: Vec<StatusCode>,
    /// Estimated block duration reported to the caller (seconds)
    pub estimated_block_duration_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 1000,
            retryable_status_codes: vec![StatusCode::TOO_MANY_REQUESTS],
            estimated_block_duration_secs: 3600,
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `attempt` (1-based)
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2_u64.saturating_pow(attempt.saturating_sub(1));
        Duration::from_millis(self.initial_backoff_ms.saturating_mul(factor))
    }
}

/// Map a non-success status to a provider error
fn status_error(
    provider: &'static str,
    status: StatusCode,
    resource: &str,
    body: String,
) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Unauthorized { provider },
        StatusCode::NOT_FOUND => ProviderError::NotFound {
            provider,
            resource: resource.to_owned(),
        },
        _ => ProviderError::Api {
            provider,
            status: status.as_u16(),
            message: body,
        },
    }
}

/// Authenticated GET returning a parsed JSON body
///
/// Statuses listed in `retry_config` are retried with exponential backoff;
/// once attempts run out the call fails with
/// [`ProviderError::RateLimited`]. 401 and 403 map to
/// [`ProviderError::Unauthorized`], 404 to [`ProviderError::NotFound`].
pub async fn api_request_with_retry<T>(
    client: &Client,
    url: &str,
    access_token: &str,
    provider: &'static str,
    retry_config: &RetryConfig,
) -> ProviderResult<T>
where
    T: DeserializeOwned,
{
    debug!(provider, url, "Starting API request");

    let mut attempt = 0;
    loop {
        let response = client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                provider,
                message: e.to_string(),
            })?;

        let status = response.status();
        debug!(provider, status = status.as_u16(), "Received HTTP response");

        if retry_config.retryable_status_codes.contains(&status) {
            attempt += 1;
            if attempt >= retry_config.max_retries {
                warn!(
                    provider,
                    max_retries = retry_config.max_retries,
                    "API rate limit exceeded, giving up"
                );
                return Err(ProviderError::RateLimited {
                    provider,
                    retry_after_secs: retry_config.estimated_block_duration_secs,
                });
            }

            let backoff = retry_config.backoff(attempt);
            warn!(
                provider,
                status = status.as_u16(),
                attempt,
                backoff_ms = backoff.as_millis() as u64,
                "API rate limit hit, backing off"
            );
            tokio::time::sleep(backoff).await;
            continue;
        }

        let body = response.text().await.map_err(|e| ProviderError::Network {
            provider,
            message: e.to_string(),
        })?;

        if !status.is_success() {
            warn!(provider, status = status.as_u16(), "API request failed");
            return Err(status_error(provider, status, url, body));
        }

        return serde_json::from_str(&body).map_err(|e| {
            warn!(provider, error = %e, "Failed to parse API response");
            ProviderError::MalformedPayload {
                provider,
                reason: e.to_string(),
            }
        });
    }
}

/// Token endpoint response for the password grant
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for API calls
    pub access_token: String,
    /// Long-lived token, when the server issues one
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of `access_token` in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Client credentials sent with a password grant
#[derive(Debug, Clone, Copy)]
pub struct PasswordGrant<'a> {
    /// Token endpoint URL
    pub token_url: &'a str,
    /// `OAuth2` client id
    pub client_id: &'a str,
    /// `OAuth2` client secret, if the client is confidential
    pub client_secret: Option<&'a str>,
}

/// Exchange a username and password for tokens
///
/// 400 and 401 responses mean the credentials were rejected.
pub async fn request_password_grant(
    client: &Client,
    grant: PasswordGrant<'_>,
    username: &str,
    password: &str,
) -> Result<TokenResponse, AuthError> {
    info!(token_url = grant.token_url, "Requesting password grant");

    let mut params = vec![
        ("grant_type", "password"),
        ("username", username),
        ("password", password),
        ("client_id", grant.client_id),
    ];
    if let Some(secret) = grant.client_secret {
        params.push(("client_secret", secret));
    }

    let response = client
        .post(grant.token_url)
        .form(&params)
        .send()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;

    let status = response.status();
    if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
        return Err(AuthError::InvalidCredentials);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(AuthError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| AuthError::Upstream {
            status: 0,
            message: format!("Unreadable token response: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let config = RetryConfig {
            initial_backoff_ms: 100,
            ..RetryConfig::default()
        };
        assert_eq!(config.backoff(1), Duration::from_millis(100));
        assert_eq!(config.backoff(2), Duration::from_millis(200));
        assert_eq!(config.backoff(3), Duration::from_millis(400));
    }

    #[test]
    fn test_status_mapping() {
        let error = status_error("garmin", StatusCode::FORBIDDEN, "/x", String::new());
        assert!(matches!(error, ProviderError::Unauthorized { .. }));

        let error = status_error("garmin", StatusCode::BAD_GATEWAY, "/x", "down".to_owned());
        assert!(matches!(error, ProviderError::Api { status: 502, .. }));
    }
}
