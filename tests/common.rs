// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory key stores, server resources and routers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `mcpd`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::env;
use std::sync::{Arc, Once};

use anyhow::Result;
use axum::Router;
use mcpd::api_keys::ApiKeyManager;
use mcpd::config::{DatabaseUrl, ServerConfig};
use mcpd::key_store::KeyStore;
use mcpd::mcp::{McpServer, ServerResources};
use mcpd::tools::ToolRegistry;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Default configuration backed by an in-memory key store
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: DatabaseUrl::Memory,
        ..ServerConfig::default()
    }
}

/// Empty in-memory key store
pub async fn create_test_key_store() -> Result<Arc<KeyStore>> {
    init_test_logging();
    let store = KeyStore::open(&DatabaseUrl::Memory, ApiKeyManager::default()).await?;
    Ok(Arc::new(store))
}

/// Server resources with the built-in tools and one valid key
pub async fn create_test_server_resources() -> Result<(Arc<ServerResources>, String)> {
    let config = test_config();
    let registry = ToolRegistry::with_builtin_tools(&config)?;
    create_test_server_resources_with_registry(registry).await
}

/// Server resources over a caller-built registry and one valid key
pub async fn create_test_server_resources_with_registry(
    registry: ToolRegistry,
) -> Result<(Arc<ServerResources>, String)> {
    let store = create_test_key_store().await?;
    let key = store.generate().await?.into_inner();
    let resources = ServerResources::new(test_config(), store, registry);
    Ok((Arc::new(resources), key))
}

/// Complete router, middleware included
pub async fn create_test_router() -> Result<(Router, String)> {
    let (resources, key) = create_test_server_resources().await?;
    Ok((McpServer::new(resources).router(), key))
}
