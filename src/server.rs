// ABOUTME: HTTP server assembly: routes, middleware layers, and graceful shutdown
// ABOUTME: Also runs the background task that purges idle sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::middleware::{make_request_span, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{ActivityRoutes, AuthRoutes, HealthRoutes, PageRoutes, ViewRoutes};

/// How often idle sessions are swept
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(300);

/// Assemble every route group behind the tracing, request id, and CORS layers
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(ActivityRoutes::routes(Arc::clone(&resources)))
        .merge(ViewRoutes::routes(Arc::clone(&resources)))
        .merge(PageRoutes::routes(resources))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
}

/// Bind the configured address and serve until SIGINT or SIGTERM
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let addr = format!("{}:{}", resources.config.host, resources.config.http_port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    serve(listener, resources, wait_for_shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
///
/// # Errors
///
/// Returns an error if the server fails.
pub async fn serve(
    listener: TcpListener,
    resources: Arc<ServerResources>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let local_addr: SocketAddr = listener.local_addr().context("Listener has no address")?;
    let purge = tokio::spawn(purge_sessions(Arc::clone(&resources)));
    let app = build_router(resources);

    info!(address = %local_addr, "HTTP server listening");
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed");

    purge.abort();
    info!("HTTP server stopped");
    served
}

async fn purge_sessions(resources: Arc<ServerResources>) {
    let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
    interval.tick().await;
    loop {
        interval.tick().await;
        let purged = resources.sessions.purge_expired();
        if purged > 0 {
            info!(purged, active = resources.sessions.len(), "Purged idle sessions");
        } else {
            debug!(active = resources.sessions.len(), "No idle sessions to purge");
        }
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("Could not register signal handlers, falling back to Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received");
}
