// ABOUTME: Route module organization for the mcpd HTTP endpoints
// ABOUTME: One module per domain, each exposing a `routes(resources)` constructor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Health check and readiness routes
pub mod health;
/// API key generation route
pub mod keys;
/// MCP-shaped REST routes and the JSON-RPC endpoint
pub mod mcp;
/// REST tool routes
pub mod tools;

pub use health::HealthRoutes;
pub use keys::KeyRoutes;
pub use mcp::McpRoutes;
pub use tools::ToolRoutes;
