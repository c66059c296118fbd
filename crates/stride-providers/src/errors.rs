// ABOUTME: Typed failures for activity fetches and logins against the upstream service
// ABOUTME: Stable error kinds plus conversion into the HTTP-facing AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;
use stride_core::errors::{AppError, ErrorCode};

/// Failure returned by an [`ActivityProvider`](crate::ActivityProvider)
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Tokens missing, expired or rejected upstream
    #[error("{provider} rejected the supplied tokens")]
    Unauthorized {
        /// Provider name
        provider: &'static str,
    },

    /// Requested resource does not exist
    #[error("{resource} not found at {provider}")]
    NotFound {
        /// Provider name
        provider: &'static str,
        /// What was requested
        resource: String,
    },

    /// Upstream rate limit still hit after retrying
    #[error("{provider} rate limit exceeded, retry in about {retry_after_secs} seconds")]
    RateLimited {
        /// Provider name
        provider: &'static str,
        /// Estimated wait before the block lifts
        retry_after_secs: u64,
    },

    /// Request never produced a response
    #[error("Network error talking to {provider}: {message}")]
    Network {
        /// Provider name
        provider: &'static str,
        /// Transport error description
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Malformed {provider} response: {reason}")]
    MalformedPayload {
        /// Provider name
        provider: &'static str,
        /// Parse error description
        reason: String,
    },

    /// Any other non-success status
    #[error("{provider} API error {status}: {message}")]
    Api {
        /// Provider name
        provider: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },
}

/// Discriminant of [`ProviderError`] for logging and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    /// See [`ProviderError::Unauthorized`]
    Unauthorized,
    /// See [`ProviderError::NotFound`]
    NotFound,
    /// See [`ProviderError::RateLimited`]
    RateLimited,
    /// See [`ProviderError::Network`]
    Network,
    /// See [`ProviderError::MalformedPayload`]
    MalformedPayload,
    /// See [`ProviderError::Api`]
    Api,
}

impl ProviderError {
    /// The error's kind
    #[must_use]
    pub const fn kind(&self) -> ProviderErrorKind {
        match self {
            Self::Unauthorized { .. } => ProviderErrorKind::Unauthorized,
            Self::NotFound { .. } => ProviderErrorKind::NotFound,
            Self::RateLimited { .. } => ProviderErrorKind::RateLimited,
            Self::Network { .. } => ProviderErrorKind::Network,
            Self::MalformedPayload { .. } => ProviderErrorKind::MalformedPayload,
            Self::Api { .. } => ProviderErrorKind::Api,
        }
    }

    /// Whether the same request may succeed later without user action
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Network { .. })
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let code = match error.kind() {
            ProviderErrorKind::Unauthorized => ErrorCode::ExternalAuthFailed,
            ProviderErrorKind::NotFound => ErrorCode::ResourceNotFound,
            ProviderErrorKind::RateLimited => ErrorCode::ExternalRateLimited,
            ProviderErrorKind::Network => ErrorCode::ExternalServiceUnavailable,
            ProviderErrorKind::MalformedPayload | ProviderErrorKind::Api => {
                ErrorCode::ExternalServiceError
            }
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// Failure returned by an [`Authenticator`](crate::Authenticator)
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Identifier or secret rejected
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Identifier or secret empty
    #[error("Missing required credential: {field}")]
    MissingCredential {
        /// Name of the empty field
        field: &'static str,
    },

    /// Authenticator lacks the settings it needs
    #[error("Authenticator not configured: {0}")]
    NotConfigured(String),

    /// Token endpoint unreachable
    #[error("Network error during login: {0}")]
    Network(String),

    /// Token endpoint answered with an unexpected status or body
    #[error("Login failed upstream ({status}): {message}")]
    Upstream {
        /// HTTP status code, 0 when the body was the problem
        status: u16,
        /// Response body or reason
        message: String,
    },
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> Self {
        let code = match &error {
            AuthError::InvalidCredentials => ErrorCode::AuthInvalid,
            AuthError::MissingCredential { .. } => ErrorCode::MissingRequiredField,
            AuthError::NotConfigured(_) => ErrorCode::ConfigError,
            AuthError::Network(_) => ErrorCode::ExternalServiceUnavailable,
            AuthError::Upstream { .. } => ErrorCode::ExternalServiceError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}
