// ABOUTME: Configuration module for server settings loaded from the environment
// ABOUTME: Re-exports the typed ServerConfig and its sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment variable parsing into `ServerConfig`
pub mod environment;

pub use environment::{
    CorsConfig, DisplayConfig, Environment, GarminApiConfig, LogLevel, ProviderKind,
    ServerConfig, SessionConfig, SyntheticConfig,
};
