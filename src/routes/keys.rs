// ABOUTME: API key generation route
// ABOUTME: Mints a key through the key store and returns the plaintext exactly once
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Extension, Json, Router};
use mcpd_core::models::GeneratedKeyResponse;
use tracing::info;

use crate::constants::messages;
use crate::errors::AppResult;
use crate::mcp::resources::ServerResources;
use crate::middleware::AuthenticatedKey;

/// API key management routes
pub struct KeyRoutes;

impl KeyRoutes {
    /// Create the key generation route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/generate-key", post(Self::handle_generate_key))
            .with_state(resources)
    }

    async fn handle_generate_key(
        State(resources): State<Arc<ServerResources>>,
        caller: Option<Extension<AuthenticatedKey>>,
    ) -> AppResult<Json<GeneratedKeyResponse>> {
        let key = resources.key_store.generate().await?;
        info!(
            issued_by = caller.as_ref().map_or("unknown", |Extension(k)| k.key_prefix.as_str()),
            new_key_prefix = %key.prefix(),
            "API key issued over HTTP"
        );
        Ok(Json(GeneratedKeyResponse {
            api_key: key.into_inner(),
            message: messages::KEY_GENERATED.to_owned(),
        }))
    }
}
