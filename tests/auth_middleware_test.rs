// ABOUTME: Integration tests for the API key gate in front of every route
// ABOUTME: Credential sources, identical rejections and exact-match exemptions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

#[tokio::test]
async fn test_health_is_exempt() {
    let (app, _key) = common::create_test_router().await.unwrap();

    AxumTestRequest::get("/health")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK);
    AxumTestRequest::get("/ready")
        .send(app)
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_missing_and_invalid_keys_are_indistinguishable() {
    let (app, _key) = common::create_test_router().await.unwrap();

    let missing = AxumTestRequest::get("/api/tools")
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    let invalid = AxumTestRequest::get("/api/tools")
        .api_key("mcpd_wrong")
        .send(app)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(missing.bytes(), invalid.bytes());
    assert_eq!(missing.header("www-authenticate").as_deref(), Some("Bearer"));
    assert_eq!(invalid.header("www-authenticate").as_deref(), Some("Bearer"));

    let body: Value = missing.json();
    assert_eq!(body["detail"], "Invalid API key");
}

#[tokio::test]
async fn test_every_credential_source_is_accepted() {
    let (app, key) = common::create_test_router().await.unwrap();

    AxumTestRequest::get("/api/tools")
        .bearer(&key)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK);
    AxumTestRequest::get("/api/tools")
        .api_key(&key)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK);
    AxumTestRequest::get(&format!("/api/tools?api_key={key}"))
        .send(app)
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_bearer_is_checked_before_other_sources() {
    let (app, key) = common::create_test_router().await.unwrap();

    // A wrong bearer token is not rescued by a valid X-API-Key
    AxumTestRequest::get("/api/tools")
        .bearer("mcpd_wrong")
        .api_key(&key)
        .send(app)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_exemption_is_exact_match_only() {
    let (app, _key) = common::create_test_router().await.unwrap();

    for path in ["//health", "/health/", "/health/../api/tools", "/healthz"] {
        AxumTestRequest::get(path)
            .send(app.clone())
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_unknown_paths_require_a_key() {
    let (app, key) = common::create_test_router().await.unwrap();

    AxumTestRequest::get("/no/such/route")
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    AxumTestRequest::get("/no/such/route")
        .api_key(&key)
        .send(app)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_responses_carry_a_request_id() {
    let (app, key) = common::create_test_router().await.unwrap();

    let response = AxumTestRequest::get("/api/tools")
        .api_key(&key)
        .header("x-request-id", "req-123")
        .send(app.clone())
        .await;
    assert_eq!(response.header("x-request-id").as_deref(), Some("req-123"));

    let generated = AxumTestRequest::get("/health").send(app).await;
    assert!(generated.header("x-request-id").is_some());
}
