// ABOUTME: Collaborator traits for fetching activities and exchanging credentials for tokens
// ABOUTME: Provider configuration shared by the Garmin provider and the password-grant authenticator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Collaborator Traits
//!
//! Providers are stateless with respect to users: every call carries the
//! caller's [`TokenPair`], so a single instance serves all sessions. The
//! server holds them as `Arc<dyn ActivityProvider>` and
//! `Arc<dyn Authenticator>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stride_core::models::{Activity, TokenPair};

use crate::errors::{AuthError, ProviderResult};

/// Endpoints and client credentials for an upstream service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name (e.g. "garmin", "synthetic")
    pub name: String,
    /// Base URL for activity API calls
    pub api_base_url: String,
    /// `OAuth2` token endpoint for the password grant
    pub token_url: Option<String>,
    /// `OAuth2` client id
    pub client_id: Option<String>,
    /// `OAuth2` client secret
    #[serde(skip_serializing)]
    pub client_secret: Option<String>,
}

/// Source of activities for a token pair
#[async_trait]
pub trait ActivityProvider: Send + Sync {
    /// Provider name (e.g. "garmin", "synthetic")
    fn name(&self) -> &'static str;

    /// Fetch a page of activities, newest first
    ///
    /// `start` is the number of activities to skip.
    async fn fetch_activities(
        &self,
        start: usize,
        limit: usize,
        tokens: &TokenPair,
    ) -> ProviderResult<Vec<Activity>>;

    /// Fetch a single activity by its upstream id
    async fn fetch_activity_detail(
        &self,
        activity_id: u64,
        tokens: &TokenPair,
    ) -> ProviderResult<Activity>;
}

/// Exchanges user credentials for a token pair
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticator name, for logs
    fn name(&self) -> &'static str;

    /// Log in with an identifier (email) and secret (password)
    async fn login(&self, identifier: &str, secret: &str) -> Result<TokenPair, AuthError>;

    /// Forget tokens this authenticator issued
    ///
    /// Called on logout. Upstream services without a revocation endpoint
    /// keep the default no-op.
    async fn revoke(&self, _tokens: &TokenPair) {}
}
