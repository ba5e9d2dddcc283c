// ABOUTME: MCP server module: wire schema, shared resources and HTTP server assembly
// ABOUTME: The protocol surface of the gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Shared server resources
pub mod resources;
/// MCP wire types
pub mod schema;
/// Router and server lifecycle
pub mod server;

pub use resources::ServerResources;
pub use server::McpServer;
