// ABOUTME: Authenticator that logs in with the OAuth2 resource-owner password grant
// ABOUTME: Maps the token endpoint response onto the long-lived/short-lived token pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use reqwest::Client;
use stride_core::models::TokenPair;
use tracing::{info, warn};

use crate::core::{Authenticator, ProviderConfig};
use crate::errors::AuthError;
use crate::http_client::shared_client;
use crate::utils::{self, PasswordGrant};

/// Password-grant authenticator against a configured token endpoint
///
/// `oauth2` in the returned pair is the access token. `oauth1` is the refresh
/// token when one is issued, otherwise the access token again, so the pair is
/// always complete.
pub struct PasswordGrantAuthenticator {
    token_url: String,
    client_id: String,
    client_secret: Option<String>,
    client: Client,
}

impl PasswordGrantAuthenticator {
    /// Build from provider configuration
    ///
    /// Fails when the token URL or client id is missing.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, AuthError> {
        let token_url = config
            .token_url
            .clone()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AuthError::NotConfigured(format!("{} token URL", config.name)))?;
        let client_id = config
            .client_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AuthError::NotConfigured(format!("{} client id", config.name)))?;

        Ok(Self {
            token_url,
            client_id,
            client_secret: config.client_secret.clone(),
            client: shared_client().clone(),
        })
    }
}

#[async_trait]
impl Authenticator for PasswordGrantAuthenticator {
    fn name(&self) -> &'static str {
        "oauth2_password"
    }

    async fn login(&self, identifier: &str, secret: &str) -> Result<TokenPair, AuthError> {
        if identifier.trim().is_empty() {
            return Err(AuthError::MissingCredential { field: "email" });
        }
        if secret.is_empty() {
            return Err(AuthError::MissingCredential { field: "password" });
        }

        let grant = PasswordGrant {
            token_url: &self.token_url,
            client_id: &self.client_id,
            client_secret: self.client_secret.as_deref(),
        };

        let response = utils::request_password_grant(&self.client, grant, identifier, secret)
            .await
            .inspect_err(|e| warn!(error = %e, "Password grant failed"))?;

        if response.access_token.is_empty() {
            return Err(AuthError::Upstream {
                status: 0,
                message: "Token endpoint returned an empty access token".to_owned(),
            });
        }

        info!(expires_in = ?response.expires_in, "Password grant succeeded");
        let oauth1 = response
            .refresh_token
            .filter(|token| !token.is_empty())
            .unwrap_or_else(|| response.access_token.clone());
        Ok(TokenPair::new(oauth1, response.access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token_url: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            name: "garmin".to_owned(),
            api_base_url: "http://localhost".to_owned(),
            token_url: token_url.map(str::to_owned),
            client_id: Some("stride".to_owned()),
            client_secret: None,
        }
    }

    #[test]
    fn test_requires_token_url() {
        assert!(matches!(
            PasswordGrantAuthenticator::from_config(&config(None)),
            Err(AuthError::NotConfigured(_))
        ));
        assert!(PasswordGrantAuthenticator::from_config(&config(Some("http://t/token"))).is_ok());
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected_locally() {
        let auth = PasswordGrantAuthenticator::from_config(&config(Some("http://t/token"))).unwrap();
        assert!(matches!(
            auth.login("", "secret").await,
            Err(AuthError::MissingCredential { field: "email" })
        ));
    }
}
