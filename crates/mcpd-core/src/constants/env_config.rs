// ABOUTME: Environment variable names and default values for server configuration
// ABOUTME: Single source of truth shared by the server binary, CLI and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Bind address
pub const HOST: &str = "MCPD_HOST";
/// HTTP port
pub const PORT: &str = "MCPD_PORT";
/// Log level
pub const LOG_LEVEL: &str = "MCPD_LOG_LEVEL";
/// Deployment environment name
pub const ENVIRONMENT: &str = "MCPD_ENVIRONMENT";
/// Key store URL
pub const DATABASE_URL: &str = "MCPD_DATABASE_URL";
/// Random bytes per generated key
pub const API_KEY_LENGTH: &str = "MCPD_API_KEY_LENGTH";
/// Default console timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: &str = "MCPD_DEFAULT_TIMEOUT_SECS";
/// Maximum console timeout in seconds
pub const MAX_TIMEOUT_SECS: &str = "MCPD_MAX_TIMEOUT_SECS";
/// Grace between SIGTERM and SIGKILL in milliseconds
pub const KILL_GRACE_MS: &str = "MCPD_KILL_GRACE_MS";
/// Per-stream output capture cap in bytes
pub const MAX_OUTPUT_BYTES: &str = "MCPD_MAX_OUTPUT_BYTES";
/// Comma separated exact paths served without authentication
pub const EXEMPT_PATHS: &str = "MCPD_EXEMPT_PATHS";
/// Request timeout of the jsonapi tool in seconds
pub const HTTP_TOOL_TIMEOUT_SECS: &str = "MCPD_HTTP_TOOL_TIMEOUT_SECS";

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8000;
/// Default key store location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/api_keys.db";
/// Default console timeout
pub const DEFAULT_COMMAND_TIMEOUT_SECS: f64 = 30.0;
/// Default upper bound for caller supplied timeouts
pub const DEFAULT_MAX_COMMAND_TIMEOUT_SECS: f64 = 3600.0;
/// Largest value accepted for `MCPD_MAX_TIMEOUT_SECS` (one week)
pub const MAX_COMMAND_TIMEOUT_CEILING_SECS: f64 = 604_800.0;
/// Default SIGTERM to SIGKILL grace
pub const DEFAULT_KILL_GRACE_MS: u64 = 2000;
/// Default per-stream capture cap (1 MiB)
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 1024 * 1024;
/// Default exempt paths
pub const DEFAULT_EXEMPT_PATHS: &[&str] = &["/health", "/ready"];
/// Default jsonapi tool timeout
pub const DEFAULT_HTTP_TOOL_TIMEOUT_SECS: u64 = 30;
