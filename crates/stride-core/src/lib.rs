// ABOUTME: Core types and constants for the Stride fitness activity viewer
// ABOUTME: Foundation crate with error handling, the Activity model, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stride Core
//!
//! Foundation crate providing shared types and constants. It changes
//! infrequently so the scoring, provider and server crates compile
//! incrementally on top of it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: `Activity` as delivered upstream and the opaque `TokenPair`
//! - **constants**: Defaults organized by domain

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Activity, `TokenPair`)
pub mod models;
