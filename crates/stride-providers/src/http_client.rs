// ABOUTME: Process-wide reqwest client shared by every provider and authenticator
// ABOUTME: Timeouts are fixed once at startup from server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;

/// Timeouts applied to upstream calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientTimeouts {
    /// Whole-request timeout in seconds
    pub request_secs: u64,
    /// TCP/TLS connect timeout in seconds
    pub connect_secs: u64,
}

impl Default for HttpClientTimeouts {
    fn default() -> Self {
        Self {
            request_secs: 30,
            connect_secs: 10,
        }
    }
}

static TIMEOUTS: OnceLock<HttpClientTimeouts> = OnceLock::new();
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

const USER_AGENT: &str = concat!("stride-viewer/", env!("CARGO_PKG_VERSION"));

/// Fix the timeouts used by [`shared_client`]
///
/// Must run before the first upstream call; later calls are ignored.
pub fn initialize_shared_client(timeouts: HttpClientTimeouts) {
    if TIMEOUTS.set(timeouts).is_err() {
        tracing::debug!("Shared HTTP client timeouts already set, keeping the first value");
    }
}

/// Connection-pooled client for upstream calls
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let timeouts = TIMEOUTS.get().copied().unwrap_or_default();
        ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to a default HTTP client");
                Client::new()
            })
    })
}
