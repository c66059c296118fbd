// ABOUTME: Stride Viewer server binary
// ABOUTME: Loads configuration, initializes logging, and serves the HTTP API until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Stride Viewer Server Binary
//!
//! Starts the activity viewer against the provider selected by `PROVIDER`
//! (`synthetic` demo data by default, or Garmin Connect).

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use stride_viewer::{
    config::environment::{ProviderKind, ServerConfig},
    logging::LoggingConfig,
    resources::ServerResources,
    server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "stride-viewer")]
#[command(about = "Stride Viewer - personal fitness activity viewer")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind host
    #[arg(long)]
    host: Option<String>,

    /// Override provider (`synthetic` or `garmin`)
    #[arg(long)]
    provider: Option<ProviderKind>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    LoggingConfig::from_env().init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(provider) = args.provider {
        config.provider = provider;
        config.validate()?;
    }

    info!("Starting Stride Viewer");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(config)?);
    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}
