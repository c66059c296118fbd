// ABOUTME: Shared server resources injected into every route handler
// ABOUTME: Wires configuration, the activity provider, the authenticator, and the session store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared as `Arc<ServerResources>` axum state.
//! Nothing per-user lives here; per-user state is in [`Session`](crate::session::Session).

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Duration;
use stride_providers::{initialize_shared_client, ActivityProvider, Authenticator};
use tracing::info;

use crate::config::environment::{ProviderKind, ServerConfig};
use crate::session::SessionStore;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Upstream activity source
    pub provider: Arc<dyn ActivityProvider>,
    /// Login collaborator
    pub authenticator: Arc<dyn Authenticator>,
    /// Live sessions
    pub sessions: Arc<SessionStore>,
}

impl ServerResources {
    /// Assemble resources from explicit collaborators
    ///
    /// # Errors
    ///
    /// Returns an error if the session lifetime does not fit a duration.
    pub fn new(
        config: ServerConfig,
        provider: Arc<dyn ActivityProvider>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Result<Self> {
        let ttl = i64::try_from(config.session.ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .with_context(|| {
                format!(
                    "SESSION_TTL_HOURS={} is out of range",
                    config.session.ttl_hours
                )
            })?;
        Ok(Self {
            config: Arc::new(config),
            provider,
            authenticator,
            sessions: Arc::new(SessionStore::new(ttl)),
        })
    }

    /// Build the collaborators selected by `config.provider`
    ///
    /// # Errors
    ///
    /// Returns an error if the selected provider was compiled out or its
    /// configuration is incomplete.
    pub fn from_config(config: ServerConfig) -> Result<Self> {
        initialize_shared_client(config.http_client_timeouts());
        let (provider, authenticator) = match config.provider {
            ProviderKind::Garmin => garmin_collaborators(&config)?,
            ProviderKind::Synthetic => synthetic_collaborators(&config)?,
        };
        info!(
            provider = provider.name(),
            authenticator = authenticator.name(),
            "Collaborators ready"
        );
        Self::new(config, provider, authenticator)
    }
}

type Collaborators = (Arc<dyn ActivityProvider>, Arc<dyn Authenticator>);

#[cfg(feature = "provider-garmin")]
fn garmin_collaborators(config: &ServerConfig) -> Result<Collaborators> {
    use stride_core::constants::oauth_providers;
    use stride_providers::{GarminConnectProvider, PasswordGrantAuthenticator, ProviderConfig};

    let provider_config = ProviderConfig {
        name: oauth_providers::GARMIN.to_owned(),
        api_base_url: config.garmin.base_url.clone(),
        token_url: config.garmin.token_url.clone(),
        client_id: config.garmin.client_id.clone(),
        client_secret: config.garmin.client_secret.clone(),
    };
    let authenticator = PasswordGrantAuthenticator::from_config(&provider_config)?;
    let provider = GarminConnectProvider::with_config(provider_config);
    Ok((Arc::new(provider), Arc::new(authenticator)))
}

#[cfg(not(feature = "provider-garmin"))]
fn garmin_collaborators(_config: &ServerConfig) -> Result<Collaborators> {
    bail!("PROVIDER=garmin requires the provider-garmin feature")
}

#[cfg(feature = "provider-synthetic")]
fn synthetic_collaborators(config: &ServerConfig) -> Result<Collaborators> {
    use stride_providers::{demo_account, SyntheticProvider};

    if config.synthetic.user.trim().is_empty() || config.synthetic.password.is_empty() {
        bail!("SYNTHETIC_USER and SYNTHETIC_PASSWORD must not be empty");
    }
    let today = chrono::Local::now().date_naive();
    let activities = SyntheticProvider::generate_activities(today, config.synthetic.history_days);
    let (authenticator, provider) =
        demo_account(&config.synthetic.user, &config.synthetic.password, activities);
    info!(
        user = %config.synthetic.user,
        activities = provider.activity_count(),
        "Synthetic demo account ready"
    );
    Ok((Arc::new(provider), Arc::new(authenticator)))
}

#[cfg(not(feature = "provider-synthetic"))]
fn synthetic_collaborators(_config: &ServerConfig) -> Result<Collaborators> {
    bail!("PROVIDER=synthetic requires the provider-synthetic feature")
}
