// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Typed server settings parsed from environment variables with documented defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Every setting has a default so the server starts with no environment at
//! all, serving synthetic data on `127.0.0.1:3000`.

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use stride_core::constants::{network, oauth_providers, paging, session};
use stride_intelligence::Locale;
use stride_providers::HttpClientTimeouts;
use tracing::info;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Default level
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Which upstream the server talks to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// In-process demo data
    #[default]
    Synthetic,
    /// Garmin Connect
    Garmin,
}

impl ProviderKind {
    /// Provider name constant
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Synthetic => oauth_providers::SYNTHETIC,
            Self::Garmin => oauth_providers::GARMIN,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            oauth_providers::SYNTHETIC => Ok(Self::Synthetic),
            oauth_providers::GARMIN => Ok(Self::Garmin),
            other => bail!("Unknown provider '{other}', expected 'synthetic' or 'garmin'"),
        }
    }
}

/// Garmin Connect endpoints and client credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarminApiConfig {
    /// Activity API base URL
    pub base_url: String,
    /// `OAuth2` token endpoint used for password logins
    pub token_url: Option<String>,
    /// `OAuth2` client id
    pub client_id: Option<String>,
    /// `OAuth2` client secret
    #[serde(skip_serializing)]
    pub client_secret: Option<String>,
}

impl Default for GarminApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://connectapi.garmin.com".to_owned(),
            token_url: None,
            client_id: None,
            client_secret: None,
        }
    }
}

/// Demo account served by the synthetic provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticConfig {
    /// Accepted login identifier
    pub user: String,
    /// Accepted login secret
    #[serde(skip_serializing)]
    pub password: String,
    /// Days of generated history, ending today
    pub history_days: u32,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            user: "demo@stride.local".to_owned(),
            password: "stride-demo".to_owned(),
            history_days: 120,
        }
    }
}

/// Session cookie behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle lifetime in hours
    pub ttl_hours: u64,
    /// Add `Secure` to the session cookie
    pub cookie_secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: session::DEFAULT_TTL_HOURS,
            cookie_secure: false,
        }
    }
}

/// CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Label language
    pub locale: Locale,
    /// Activities per list page
    pub list_page_size: usize,
    /// Activities fetched to fill the calendar
    pub calendar_fetch_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            list_page_size: paging::DEFAULT_PAGE_SIZE,
            calendar_fetch_limit: paging::CALENDAR_FETCH_LIMIT,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Default log level
    pub log_level: LogLevel,
    /// Upstream selection
    pub provider: ProviderKind,
    /// Garmin settings, used when `provider` is Garmin
    pub garmin: GarminApiConfig,
    /// Demo account, used when `provider` is synthetic
    pub synthetic: SyntheticConfig,
    /// Session settings
    pub session: SessionConfig,
    /// CORS settings
    pub cors: CorsConfig,
    /// Presentation settings
    pub display: DisplayConfig,
    /// Upstream request timeout in seconds
    pub http_client_timeout_secs: u64,
    /// Upstream connect timeout in seconds
    pub http_client_connect_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let timeouts = HttpClientTimeouts::default();
        Self {
            host: network::DEFAULT_HOST.to_owned(),
            http_port: network::DEFAULT_HTTP_PORT,
            environment: Environment::default(),
            log_level: LogLevel::default(),
            provider: ProviderKind::default(),
            garmin: GarminApiConfig::default(),
            synthetic: SyntheticConfig::default(),
            session: SessionConfig::default(),
            cors: CorsConfig::default(),
            display: DisplayConfig::default(),
            http_client_timeout_secs: timeouts.request_secs,
            http_client_connect_timeout_secs: timeouts.connect_secs,
        }
    }
}

/// Read a variable, treating empty values as unset
fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Read and parse a variable, falling back to `default` when unset
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_opt(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}"))
    })
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value or the
    /// resulting configuration is inconsistent.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        let defaults = Self::default();

        let provider = env_opt("PROVIDER")
            .map(|raw| raw.parse::<ProviderKind>())
            .transpose()?
            .unwrap_or(defaults.provider);

        let config = Self {
            host: env_opt("HOST").unwrap_or(defaults.host),
            http_port: env_parse("HTTP_PORT", defaults.http_port)?,
            environment: env_opt("ENVIRONMENT")
                .map_or(defaults.environment, |s| Environment::from_str_or_default(&s)),
            log_level: env_opt("RUST_LOG")
                .map_or(defaults.log_level, |s| LogLevel::from_str_or_default(&s)),
            provider,
            garmin: GarminApiConfig {
                base_url: env_opt("GARMIN_API_BASE_URL").unwrap_or(defaults.garmin.base_url),
                token_url: env_opt("GARMIN_TOKEN_URL"),
                client_id: env_opt("GARMIN_CLIENT_ID"),
                client_secret: env_opt("GARMIN_CLIENT_SECRET"),
            },
            synthetic: SyntheticConfig {
                user: env_opt("SYNTHETIC_USER").unwrap_or(defaults.synthetic.user),
                password: env_opt("SYNTHETIC_PASSWORD").unwrap_or(defaults.synthetic.password),
                history_days: env_parse("SYNTHETIC_HISTORY_DAYS", defaults.synthetic.history_days)?,
            },
            session: SessionConfig {
                ttl_hours: env_parse("SESSION_TTL_HOURS", defaults.session.ttl_hours)?,
                cookie_secure: env_parse("SESSION_COOKIE_SECURE", defaults.session.cookie_secure)?,
            },
            cors: CorsConfig {
                allowed_origins: env_opt("CORS_ALLOWED_ORIGINS")
                    .unwrap_or(defaults.cors.allowed_origins),
            },
            display: DisplayConfig {
                locale: env_opt("DISPLAY_LOCALE")
                    .map_or(defaults.display.locale, |s| Locale::from_str_or_default(&s)),
                list_page_size: env_parse("LIST_PAGE_SIZE", defaults.display.list_page_size)?,
                calendar_fetch_limit: env_parse(
                    "CALENDAR_FETCH_LIMIT",
                    defaults.display.calendar_fetch_limit,
                )?,
            },
            http_client_timeout_secs: env_parse(
                "HTTP_CLIENT_TIMEOUT_SECS",
                defaults.http_client_timeout_secs,
            )?,
            http_client_connect_timeout_secs: env_parse(
                "HTTP_CLIENT_CONNECT_TIMEOUT_SECS",
                defaults.http_client_connect_timeout_secs,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        if !(1..=session::MAX_TTL_HOURS).contains(&self.session.ttl_hours) {
            bail!(
                "SESSION_TTL_HOURS must be between 1 and {}",
                session::MAX_TTL_HOURS
            );
        }
        if !(1..=paging::MAX_PAGE_SIZE).contains(&self.display.list_page_size) {
            bail!("LIST_PAGE_SIZE must be between 1 and {}", paging::MAX_PAGE_SIZE);
        }
        if !(1..=paging::MAX_PAGE_SIZE).contains(&self.display.calendar_fetch_limit) {
            bail!(
                "CALENDAR_FETCH_LIMIT must be between 1 and {}",
                paging::MAX_PAGE_SIZE
            );
        }
        if self.provider == ProviderKind::Garmin
            && (self.garmin.token_url.is_none() || self.garmin.client_id.is_none())
        {
            bail!("PROVIDER=garmin requires GARMIN_TOKEN_URL and GARMIN_CLIENT_ID");
        }
        Ok(())
    }

    /// Session lifetime in seconds, used for the cookie `Max-Age`
    #[must_use]
    pub const fn session_ttl_secs(&self) -> u64 {
        self.session.ttl_hours.saturating_mul(3600)
    }

    /// Timeouts for the shared upstream HTTP client
    #[must_use]
    pub const fn http_client_timeouts(&self) -> HttpClientTimeouts {
        HttpClientTimeouts {
            request_secs: self.http_client_timeout_secs,
            connect_secs: self.http_client_connect_timeout_secs,
        }
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Stride Viewer Configuration:\n\
             - Bind: {}:{}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Provider: {}\n\
             - Session TTL: {}h (secure cookie: {})\n\
             - CORS Origins: {}\n\
             - Locale: {}\n\
             - List Page Size: {}\n\
             - Calendar Fetch Limit: {}",
            self.host,
            self.http_port,
            self.environment,
            self.log_level,
            self.provider,
            self.session.ttl_hours,
            self.session.cookie_secure,
            self.cors.allowed_origins,
            self.display.locale,
            self.display.list_page_size,
            self.display.calendar_fetch_limit,
        )
    }
}
