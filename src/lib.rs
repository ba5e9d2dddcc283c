// ABOUTME: Main library entry point for the mcpd tool invocation gateway
// ABOUTME: API-key gated HTTP access to host tools following the MCP tool-call shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # mcpd
//!
//! A Model Context Protocol (MCP) tool gateway for a single host. Remote
//! automation agents list tools, call them by name with structured arguments
//! and receive structured results, over HTTP, authenticated by API key.
//!
//! ## Built-in tools
//!
//! - **console**: run a shell command with a timeout (feature `tools-console`)
//! - **`system_info`**: environment, clock and process details (feature `tools-system`)
//! - **jsonapi**: outbound HTTP/JSON requests (feature `tools-http`)
//!
//! ## Architecture
//!
//! - **`key_store`**: durable set of API key digests in SQLite
//! - **middleware**: request ids and the API key gate
//! - **tools**: tool trait, registry and dispatcher
//! - **process**: bounded subprocess execution
//! - **mcp** / **routes**: wire types, HTTP routes and server lifecycle
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mcpd::api_keys::ApiKeyManager;
//! use mcpd::config::ServerConfig;
//! use mcpd::key_store::KeyStore;
//! use mcpd::mcp::{McpServer, ServerResources};
//! use mcpd::tools::ToolRegistry;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let store = KeyStore::open(
//!         &config.database_url,
//!         ApiKeyManager::new(config.auth.api_key_bytes),
//!     )
//!     .await?;
//!     store.bootstrap().await?;
//!
//!     let registry = ToolRegistry::with_builtin_tools(&config)?;
//!     let resources = ServerResources::new(config, Arc::new(store), registry);
//!     McpServer::new(Arc::new(resources)).run().await?;
//!     Ok(())
//! }
//! ```

/// API key minting and hashing
pub mod api_keys;

/// Environment configuration
pub mod config;

/// Application constants
pub mod constants;

/// `SQLite` persistence for the key store
pub mod database;

/// Error types
pub mod errors;

/// JSON-RPC 2.0 envelope types
pub mod jsonrpc;

/// Durable API key set
pub mod key_store;

/// Logging configuration and structured events
pub mod logging;

/// MCP wire types, resources and server
pub mod mcp;

/// HTTP middleware
pub mod middleware;

/// Bounded subprocess execution
pub mod process;

/// HTTP routes
pub mod routes;

/// Tool abstraction, registry and dispatch
pub mod tools;
