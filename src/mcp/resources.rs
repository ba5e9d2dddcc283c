// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Bundles configuration, key store, tool registry, dispatcher and authenticator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared as `Arc<ServerResources>`. Nothing in
//! here is mutated after construction except the key store, which owns its
//! own synchronization.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::key_store::KeyStore;
use crate::middleware::ApiKeyAuthenticator;
use crate::tools::{Dispatcher, ToolRegistry};

/// Centralized resource container for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerResources {
    /// Effective configuration
    pub config: Arc<ServerConfig>,
    /// Durable API key set
    pub key_store: Arc<KeyStore>,
    /// Registered tools
    pub registry: Arc<ToolRegistry>,
    /// Tool call router
    pub dispatcher: Dispatcher,
    /// Request gate
    pub authenticator: ApiKeyAuthenticator,
}

impl ServerResources {
    /// Wire the shared components together
    #[must_use]
    pub fn new(config: ServerConfig, key_store: Arc<KeyStore>, registry: ToolRegistry) -> Self {
        let registry = Arc::new(registry);
        let authenticator =
            ApiKeyAuthenticator::new(Arc::clone(&key_store), config.auth.exempt_paths.clone());
        Self {
            config: Arc::new(config),
            key_store,
            dispatcher: Dispatcher::new(Arc::clone(&registry)),
            registry,
            authenticator,
        }
    }
}
