// ABOUTME: Activity provider and authenticator implementations for Garmin Connect and synthetic data
// ABOUTME: Core collaborator traits, typed provider errors, retry utilities, and the shared HTTP client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fitness data providers and authenticators.
//!
//! The server talks to the upstream fitness service only through the
//! [`ActivityProvider`] and [`Authenticator`] traits. Implementations are
//! selected at startup and shared by every session; per-user state travels
//! in the [`TokenPair`](stride_core::models::TokenPair) passed to each call.

pub use stride_core::constants;
pub use stride_core::models;

/// Core provider traits and configuration
pub mod core;
/// Typed provider and authentication errors
pub mod errors;
/// Shared HTTP client for provider API calls
pub mod http_client;
/// `OAuth2` password-grant authenticator
pub mod oauth;
/// Provider utility functions (retry, token exchange)
pub mod utils;

/// Garmin Connect provider implementation
#[cfg(feature = "provider-garmin")]
pub mod garmin_provider;
/// Deterministic in-process provider and authenticator
#[cfg(feature = "provider-synthetic")]
pub mod synthetic_provider;

pub use core::{ActivityProvider, Authenticator, ProviderConfig};
pub use errors::{AuthError, ProviderError, ProviderErrorKind, ProviderResult};
#[cfg(feature = "provider-garmin")]
pub use garmin_provider::GarminConnectProvider;
pub use http_client::{initialize_shared_client, shared_client, HttpClientTimeouts};
pub use oauth::PasswordGrantAuthenticator;
#[cfg(feature = "provider-synthetic")]
pub use synthetic_provider::{demo_account, IssuedTokens, SyntheticAuthenticator, SyntheticProvider};
pub use utils::RetryConfig;
