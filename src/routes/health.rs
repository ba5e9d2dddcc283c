// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness with tool count and readiness backed by a key store probe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! Both paths are in the default exempt set, so load balancers can probe
//! them without a key.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;
use tracing::warn;

use crate::constants::{endpoints, protocol};
use crate::mcp::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(endpoints::HEALTH, get(Self::handle_health))
            .route(endpoints::READY, get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Response {
        Json(json!({
            "status": "healthy",
            "timestamp": Utc::now().to_rfc3339(),
            "version": protocol::SERVER_VERSION,
            "tools_count": resources.registry.len(),
        }))
        .into_response()
    }

    async fn handle_ready(State(resources): State<Arc<ServerResources>>) -> Response {
        match resources.key_store.ping().await {
            Ok(()) => Json(json!({
                "status": "ready",
                "timestamp": Utc::now().to_rfc3339(),
            }))
            .into_response(),
            Err(e) => {
                warn!("Readiness probe failed: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "status": "not_ready",
                        "timestamp": Utc::now().to_rfc3339(),
                        "reason": "key store unavailable",
                    })),
                )
                    .into_response()
            }
        }
    }
}
