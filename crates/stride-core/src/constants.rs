// ABOUTME: Application constants organized by domain
// ABOUTME: Provider names, paging defaults, session cookie settings, and API limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Pure data constants grouped by domain. Runtime-tunable values live in the
//! server configuration; these are the defaults it falls back to.

/// Provider identifiers
pub mod oauth_providers {
    /// Garmin Connect
    pub const GARMIN: &str = "garmin";
    /// Deterministic in-process provider for development and tests
    pub const SYNTHETIC: &str = "synthetic";
    /// Lifetime of tokens issued by the synthetic authenticator
    pub const SYNTHETIC_TOKEN_TTL_HOURS: u32 = 24;
}

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// API base path
    pub const API_BASE: &str = "/api";
}

/// Network defaults
pub mod network {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
    /// Default bind host
    pub const DEFAULT_HOST: &str = "127.0.0.1";
}

/// Paging defaults for activity fetches
pub mod paging {
    /// Page size for the list view and raw activity endpoint
    pub const DEFAULT_PAGE_SIZE: usize = 10;
    /// Window fetched to populate the calendar (roughly three months)
    pub const CALENDAR_FETCH_LIMIT: usize = 100;
    /// Upper bound accepted from clients for a single page
    pub const MAX_PAGE_SIZE: usize = 100;
}

/// Session cookie settings
pub mod session {
    /// Cookie carrying the session id
    pub const COOKIE_NAME: &str = "stride_session";
    /// Default idle lifetime of a session in hours
    pub const DEFAULT_TTL_HOURS: u64 = 24;
    /// Longest accepted session lifetime in hours (100 years)
    pub const MAX_TTL_HOURS: u64 = 8_760 * 100;
}

/// Upstream API limits
pub mod api_provider_limits {
    /// Garmin Connect limits
    pub mod garmin {
        /// Default number of activities per page
        pub const DEFAULT_ACTIVITIES_PER_PAGE: usize = 10;
        /// Largest page the activity list endpoint serves in one call
        pub const MAX_ACTIVITIES_PER_REQUEST: usize = 100;
        /// Rough duration of a rate-limit block, for user-facing messages
        pub const ESTIMATED_RATE_LIMIT_BLOCK_DURATION_SECS: u64 = 900;
    }
}

/// Unit conversion constants
pub mod units {
    /// Meters per kilometer
    pub const METERS_PER_KM: f64 = 1000.0;
    /// Seconds per minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
}
