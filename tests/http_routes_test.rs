// ABOUTME: Integration tests for the REST surface of the gateway
// ABOUTME: Health, tool listing, tool calls and API key generation through the full router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_reports_tools() {
    let (app, _key) = common::create_test_router().await.unwrap();

    let body: Value = AxumTestRequest::get("/health")
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["tools_count"], 3);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_list_tools() {
    let (app, key) = common::create_test_router().await.unwrap();

    let body: Value = AxumTestRequest::get("/api/tools")
        .api_key(&key)
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let tools = body["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["console", "system_info", "jsonapi"]);
    assert_eq!(tools[0]["parameters"]["type"], "object");
    assert!(tools[0]["description"].as_str().unwrap().contains("console"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_call_console_tool() {
    let (app, key) = common::create_test_router().await.unwrap();

    let body: Value = AxumTestRequest::post("/api/tools/console")
        .api_key(&key)
        .json(&json!({"command": "echo hello"}))
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["tool"], "console");
    assert_eq!(body["result"]["stdout"], "hello\n");
    assert_eq!(body["result"]["exit_code"], 0);
    assert_eq!(body["result"]["success"], true);
    assert_eq!(body["result"]["timed_out"], false);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_call_unknown_tool_is_404() {
    let (app, key) = common::create_test_router().await.unwrap();

    let body: Value = AxumTestRequest::post("/api/tools/ghost")
        .api_key(&key)
        .json(&json!({}))
        .send(app)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();

    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_call_with_invalid_arguments_is_400() {
    let (app, key) = common::create_test_router().await.unwrap();

    let body: Value = AxumTestRequest::post("/api/tools/console")
        .api_key(&key)
        .json(&json!({"timeout": 5}))
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert!(!body["error"]["details"]["violations"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_call_with_malformed_body_is_400() {
    let (app, key) = common::create_test_router().await.unwrap();

    AxumTestRequest::post("/api/tools/system_info")
        .api_key(&key)
        .header("content-type", "application/json")
        .raw_body("{not json")
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_call_with_empty_body_uses_defaults() {
    let (app, key) = common::create_test_router().await.unwrap();

    let body: Value = AxumTestRequest::post("/api/tools/system_info")
        .api_key(&key)
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert!(body["result"]["process"]["pid"].is_number());
    assert!(body["result"]["time"]["utc"].is_string());
}

#[tokio::test]
async fn test_generated_key_works_immediately() {
    let (app, key) = common::create_test_router().await.unwrap();

    let body: Value = AxumTestRequest::post("/api/generate-key")
        .api_key(&key)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();

    let new_key = body["api_key"].as_str().unwrap().to_owned();
    assert_ne!(new_key, key);
    assert!(new_key.starts_with("mcpd_"));
    assert_eq!(body["message"], "New API key generated successfully");

    AxumTestRequest::get("/api/tools")
        .bearer(&new_key)
        .send(app)
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_generate_key_requires_a_key() {
    let (app, _key) = common::create_test_router().await.unwrap();

    AxumTestRequest::post("/api/generate-key")
        .send(app)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
