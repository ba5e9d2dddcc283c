// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Endpoints, protocol identifiers, key format and configuration defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Application constants grouped by domain.

/// Environment variable names and their defaults
pub mod env_config;

/// API endpoints
pub mod endpoints {
    /// Liveness endpoint
    pub const HEALTH: &str = "/health";
    /// Readiness endpoint
    pub const READY: &str = "/ready";
    /// JSON-RPC MCP endpoint
    pub const MCP: &str = "/mcp";
}

/// MCP protocol identifiers
pub mod protocol {
    /// MCP protocol revision implemented by the gateway
    pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
    /// JSON-RPC version string
    pub const JSONRPC_VERSION: &str = "2.0";
    /// Server name reported in `serverInfo`
    pub const SERVER_NAME: &str = "mcpd";
    /// Server version reported in `serverInfo` and `/health`
    pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// API key format
pub mod key_format {
    /// Prefix identifying mcpd keys in logs and configuration
    pub const KEY_PREFIX: &str = "mcpd_";
    /// Minimum random bytes per key (256 bits)
    pub const MIN_KEY_BYTES: usize = 32;
    /// Characters of the key kept as a display prefix
    pub const DISPLAY_PREFIX_LEN: usize = 12;
}

/// HTTP header names
pub mod headers {
    /// Alternate API key header
    pub const X_API_KEY: &str = "x-api-key";
    /// Query parameter carrying an API key
    pub const API_KEY_QUERY_PARAM: &str = "api_key";
    /// Request id header
    pub const X_REQUEST_ID: &str = "x-request-id";
}

/// Built-in tool names
pub mod tools {
    /// Shell command execution tool
    pub const CONSOLE: &str = "console";
    /// Host information tool
    pub const SYSTEM_INFO: &str = "system_info";
    /// Outbound JSON API tool
    pub const JSON_API: &str = "jsonapi";
}

/// Messages returned to callers
pub mod messages {
    /// Body detail of every authentication failure
    pub const INVALID_API_KEY: &str = "Invalid API key";
    /// Confirmation returned with a freshly minted key
    pub const KEY_GENERATED: &str = "New API key generated successfully";
}
