// ABOUTME: REST tool routes: list tools and call a tool by name
// ABOUTME: Failures map to HTTP status codes with the standard error body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! REST tool routes
//!
//! Unlike the MCP-shaped routes, `POST /api/tools/:name` reports failures
//! through the status code: 404 unknown tool, 400 invalid arguments, 500
//! execution failure.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::errors::{AppError, AppResult};
use crate::mcp::resources::ServerResources;
use crate::middleware::{AuthenticatedKey, RequestId};
use crate::tools::ToolExecutionContext;

/// REST tool routes implementation
pub struct ToolRoutes;

impl ToolRoutes {
    /// Create the REST tool routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/tools", get(Self::handle_list_tools))
            .route("/api/tools/:name", post(Self::handle_call_tool))
            .with_state(resources)
    }

    async fn handle_list_tools(State(resources): State<Arc<ServerResources>>) -> Response {
        let tools: Vec<Value> = resources
            .registry
            .list()
            .iter()
            .map(|entry| {
                let tool = entry.tool();
                json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "parameters": tool.input_schema(),
                })
            })
            .collect();
        Json(json!({ "tools": tools })).into_response()
    }

    async fn handle_call_tool(
        State(resources): State<Arc<ServerResources>>,
        Path(name): Path<String>,
        request_id: Option<Extension<RequestId>>,
        key: Option<Extension<AuthenticatedKey>>,
        body: Bytes,
    ) -> AppResult<Response> {
        let arguments = parse_body(&body)?;
        let context = ToolExecutionContext::from_request(
            request_id.as_ref().map(|Extension(id)| id),
            key.as_ref().map(|Extension(k)| k),
        );

        let result = resources
            .dispatcher
            .call(&name, arguments, &context)
            .await
            .into_result()?;

        Ok(Json(json!({
            "tool": name,
            "result": result.content,
            "timestamp": Utc::now().to_rfc3339(),
        }))
        .into_response())
    }
}

/// Parse a request body as JSON; an empty body means no arguments
///
/// # Errors
///
/// Returns `InvalidInput` if the body is not valid JSON
pub fn parse_body(body: &[u8]) -> AppResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::invalid_input(format!("Request body is not valid JSON: {e}")))
}
