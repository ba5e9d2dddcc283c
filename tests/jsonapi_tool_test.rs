// ABOUTME: Integration tests for the jsonapi tool against a local HTTP server
// ABOUTME: Method, query, header and JSON body forwarding plus non-JSON responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![cfg(feature = "tools-http")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::extract::Query;
use axum::http::{HeaderMap, Method};
use axum::routing::{any, get};
use axum::{Json, Router};
use mcpd::config::HttpToolConfig;
use mcpd::tools::implementations::JsonApiTool;
use mcpd::tools::{McpTool, ToolExecutionContext};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::time;

async fn echo(
    method: Method,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Json<Value> {
    Json(json!({
        "method": method.as_str(),
        "query": query,
        "x_trace": headers.get("x-trace").and_then(|v| v.to_str().ok()),
        "body": serde_json::from_str::<Value>(&body).ok(),
    }))
}

async fn spawn_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/echo", any(echo))
        .route("/plain", get(|| async { "just text" }))
        .route(
            "/slow",
            get(|| async {
                time::sleep(Duration::from_secs(5)).await;
                "too late"
            }),
        );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn call(args: Value) -> Value {
    call_with(&HttpToolConfig::default(), args).await
}

async fn call_with(config: &HttpToolConfig, args: Value) -> Value {
    common::init_test_logging();
    let tool = JsonApiTool::new(config).unwrap();
    tool.execute(args, &ToolExecutionContext::new("req_jsonapi"))
        .await
        .unwrap()
        .content
}

#[tokio::test]
async fn test_get_with_query_and_headers() {
    let addr = spawn_upstream().await;

    let result = call(json!({
        "endpoint": format!("http://{addr}/echo"),
        "params": {"q": "rust"},
        "headers": {"X-Trace": "abc"},
    }))
    .await;

    assert_eq!(result["status_code"], 200);
    assert_eq!(result["success"], true);
    assert_eq!(result["data"]["method"], "GET");
    assert_eq!(result["data"]["query"]["q"], "rust");
    assert_eq!(result["data"]["x_trace"], "abc");
    assert!(result["headers"]["content-type"]
        .as_str()
        .unwrap()
        .starts_with("application/json"));
}

#[tokio::test]
async fn test_post_forwards_json_body() {
    let addr = spawn_upstream().await;

    let result = call(json!({
        "endpoint": format!("http://{addr}/echo"),
        "method": "post",
        "json": {"answer": 42},
    }))
    .await;

    assert_eq!(result["data"]["method"], "POST");
    assert_eq!(result["data"]["body"], json!({"answer": 42}));
}

#[tokio::test]
async fn test_non_json_response_is_returned_as_text() {
    let addr = spawn_upstream().await;

    let result = call(json!({ "endpoint": format!("http://{addr}/plain") })).await;
    assert_eq!(result["data"], "just text");
}

#[tokio::test]
async fn test_error_status_is_not_a_failure() {
    let addr = spawn_upstream().await;

    let result = call(json!({ "endpoint": format!("http://{addr}/missing") })).await;
    assert_eq!(result["status_code"], 404);
    assert_eq!(result["success"], false);
}

#[tokio::test]
async fn test_configured_timeout_is_honored() {
    let addr = spawn_upstream().await;
    let config = HttpToolConfig {
        request_timeout: Duration::from_millis(300),
    };

    let started = Instant::now();
    let result = call_with(&config, json!({ "endpoint": format!("http://{addr}/slow") })).await;

    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(result["success"], false);
    assert!(result["status_code"].is_null());
    assert!(result["error"].is_string());
}
