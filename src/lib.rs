// ABOUTME: Main library entry point for the Stride Viewer activity server
// ABOUTME: Sessions, fetch sequencing, HTTP routes, and views over the scoring core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stride Viewer
//!
//! A personal fitness activity viewer. Activities are fetched from an
//! upstream provider on behalf of a logged-in user, scored for effort, and
//! presented as a paged list or a six-week month calendar.
//!
//! ## Architecture
//!
//! - **`stride-core`**: Activity and token models, error codes, constants
//! - **`stride-intelligence`**: Pure scoring, formatting, and calendar layout
//! - **`stride-providers`**: Upstream provider and authenticator seams
//! - **this crate**: Configuration, sessions, routes, and views
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stride_viewer::config::environment::ServerConfig;
//! use stride_viewer::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = Arc::new(ServerResources::from_config(config)?);
//!     stride_viewer::server::run(resources).await
//! }
//! ```

/// Environment configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (CORS, request tracing)
pub mod middleware;

/// Shared server resources
pub mod resources;

/// HTTP route groups
pub mod routes;

/// Stale-response guard for concurrent fetches
pub mod sequencing;

/// HTTP server assembly
pub mod server;

/// Per-login sessions and cookies
pub mod session;

/// View models and HTML rendering
pub mod views;

pub use stride_core::{constants, errors, models};
