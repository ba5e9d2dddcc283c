// ABOUTME: HTTP server assembly: router, middleware stack and graceful shutdown
// ABOUTME: Every route sits behind the API key gate except the configured exact exempt paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # HTTP Server
//!
//! Middleware order, outermost first:
//!
//! 1. request id and per-request span
//! 2. `tower-http` trace layer
//! 3. request body limit
//! 4. API key authentication
//!
//! The auth layer wraps the fallback too, so unknown paths answer 401 to
//! unauthenticated callers rather than 404.

use std::future;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::signal;
#[cfg(unix)]
use tokio::signal::unix::{self, SignalKind};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};
use crate::middleware::{request_tracing, require_api_key};
use crate::routes::{HealthRoutes, KeyRoutes, McpRoutes, ToolRoutes};

use super::resources::ServerResources;

/// Largest accepted request body
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// The gateway's HTTP server
#[derive(Debug, Clone)]
pub struct McpServer {
    resources: Arc<ServerResources>,
}

impl McpServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Shared resources
    #[must_use]
    pub const fn resources(&self) -> &Arc<ServerResources> {
        &self.resources
    }

    /// Build the complete router with its middleware stack
    pub fn router(&self) -> Router {
        let resources = &self.resources;
        Router::new()
            .merge(HealthRoutes::routes(Arc::clone(resources)))
            .merge(ToolRoutes::routes(Arc::clone(resources)))
            .merge(McpRoutes::routes(Arc::clone(resources)))
            .merge(KeyRoutes::routes(Arc::clone(resources)))
            .layer(middleware::from_fn_with_state(
                resources.authenticator.clone(),
                require_api_key,
            ))
            .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request_tracing))
    }

    /// Bind the configured address and serve until SIGINT or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails
    pub async fn run(self) -> AppResult<()> {
        let address = self.resources.config.bind_address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            AppError::config(format!("Failed to bind {address}: {e}")).with_source(e)
        })?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until SIGINT or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails
    pub async fn serve(self, listener: TcpListener) -> AppResult<()> {
        let local = listener.local_addr()?;
        info!(
            address = %local,
            tools = self.resources.registry.len(),
            "mcpd listening"
        );
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Server stopped");
        Ok(())
    }
}

/// Resolves on SIGINT, or SIGTERM on Unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix::signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
