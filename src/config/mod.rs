// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-only configuration loaded once at startup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Configuration module for the mcpd gateway
//!
//! - **Environment**: Server configuration from `MCPD_*` environment variables

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AuthConfig, ConsoleConfig, DatabaseUrl, Environment, HttpToolConfig, LogLevel, ServerConfig,
};
