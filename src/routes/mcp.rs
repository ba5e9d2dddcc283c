// ABOUTME: MCP (Model Context Protocol) route handlers for agent integration
// ABOUTME: MCP-shaped REST endpoints plus the JSON-RPC 2.0 transport at /mcp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! MCP protocol routes
//!
//! Tool failures are reported inside the `CallToolResult` (`isError: true`)
//! and never change the HTTP status. Protocol-level problems on `/mcp` use
//! JSON-RPC error objects.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::constants::endpoints;
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse};
use crate::mcp::resources::ServerResources;
use crate::mcp::schema::{InitializeResponse, ToolCall, ToolResponse, ToolsListResponse};
use crate::middleware::{AuthenticatedKey, RequestId};
use crate::tools::ToolExecutionContext;

use super::tools::parse_body;

/// MCP routes implementation
pub struct McpRoutes;

impl McpRoutes {
    /// Create all MCP routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/mcp/initialize", get(Self::handle_initialize))
            .route("/api/mcp/tools/list", get(Self::handle_tools_list))
            .route("/api/mcp/tools/call", post(Self::handle_tools_call))
            .route(endpoints::MCP, post(Self::handle_jsonrpc))
            .with_state(resources)
    }

    async fn handle_initialize() -> Json<InitializeResponse> {
        Json(InitializeResponse::new())
    }

    async fn handle_tools_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<ToolsListResponse> {
        Json(ToolsListResponse {
            tools: resources.registry.schemas(),
        })
    }

    async fn handle_tools_call(
        State(resources): State<Arc<ServerResources>>,
        request_id: Option<Extension<RequestId>>,
        key: Option<Extension<AuthenticatedKey>>,
        body: Bytes,
    ) -> Json<ToolResponse> {
        let context = call_context(request_id.as_ref(), key.as_ref());
        let call = parse_body(&body).and_then(|value| {
            serde_json::from_value::<ToolCall>(value).map_err(Into::into)
        });
        match call {
            Ok(call) => Json(call_tool(&resources, call, &context).await),
            Err(e) => Json(ToolResponse::error(format!("Invalid tool call: {}", e.message))),
        }
    }

    async fn handle_jsonrpc(
        State(resources): State<Arc<ServerResources>>,
        request_id: Option<Extension<RequestId>>,
        key: Option<Extension<AuthenticatedKey>>,
        body: Bytes,
    ) -> Response {
        let Ok(value) = serde_json::from_slice::<Value>(&body) else {
            return Json(JsonRpcResponse::error(
                None,
                error_codes::PARSE_ERROR,
                "Parse error",
            ))
            .into_response();
        };

        // `"id": null` still expects a response; only a missing id marks a notification
        let is_notification = value.get("id").is_none();
        let id = value.get("id").cloned();
        let request = match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) if request.jsonrpc == "2.0" => request,
            _ => {
                return Json(JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_REQUEST,
                    "Invalid Request",
                ))
                .into_response();
            }
        };

        let context = call_context(request_id.as_ref(), key.as_ref());
        let response = Self::dispatch_jsonrpc(&resources, request, &context).await;

        if is_notification {
            return StatusCode::ACCEPTED.into_response();
        }
        Json(response).into_response()
    }

    async fn dispatch_jsonrpc(
        resources: &ServerResources,
        request: JsonRpcRequest,
        context: &ToolExecutionContext,
    ) -> JsonRpcResponse {
        let id = request.id.clone();
        debug!(method = %request.method, "JSON-RPC request");

        match request.method.as_str() {
            "initialize" => result_response(id, &InitializeResponse::new()),
            "notifications/initialized" | "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => result_response(
                id,
                &ToolsListResponse {
                    tools: resources.registry.schemas(),
                },
            ),
            "tools/call" => {
                let params = request.params.unwrap_or(Value::Null);
                match serde_json::from_value::<ToolCall>(params) {
                    Ok(call) => result_response(id, &call_tool(resources, call, context).await),
                    Err(e) => JsonRpcResponse::error(
                        id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid params: {e}"),
                    ),
                }
            }
            other => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        }
    }
}

async fn call_tool(
    resources: &ServerResources,
    call: ToolCall,
    context: &ToolExecutionContext,
) -> ToolResponse {
    resources
        .dispatcher
        .call(&call.name, call.arguments.unwrap_or(Value::Null), context)
        .await
        .into_response()
}

fn call_context(
    request_id: Option<&Extension<RequestId>>,
    key: Option<&Extension<AuthenticatedKey>>,
) -> ToolExecutionContext {
    ToolExecutionContext::from_request(
        request_id.map(|Extension(id)| id),
        key.map(|Extension(k)| k),
    )
}

fn result_response<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => {
            error!(error = %e, "Failed to serialize JSON-RPC result");
            JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, "Internal error")
        }
    }
}
