// ABOUTME: Defines the McpTool trait and ToolCapabilities for the built-in tools
// ABOUTME: Tools implement this trait to be registered in the ToolRegistry and invoked by the Dispatcher
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # MCP Tool Trait and Capabilities
//!
//! Every tool the gateway exposes implements [`McpTool`]:
//! - metadata (name, description, input schema)
//! - capability flags, used for logging and operator visibility
//! - async execution with a per-call context
//!
//! Tools do not validate their arguments against their own schema; the
//! [`Dispatcher`](super::dispatcher::Dispatcher) does that before `execute`
//! is called. Semantic checks the schema cannot express (a URL that does not
//! parse, a timeout above the configured maximum) are reported as
//! [`ErrorCode::InvalidInput`](crate::errors::ErrorCode::InvalidInput) and
//! surface as invalid arguments.

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use crate::errors::AppResult;
use crate::mcp::schema::JsonSchema;

use super::context::ToolExecutionContext;
use super::result::ToolResult;

bitflags! {
    /// What a tool does to or reads from the host.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Spawns arbitrary shell commands
        const EXECUTES_COMMANDS = 0b0000_0001;
        /// Reads host state (clock, process, filesystem)
        const READS_HOST_STATE = 0b0000_0010;
        /// Reads the server's environment variables
        const READS_ENVIRONMENT = 0b0000_0100;
        /// Performs outbound network requests
        const NETWORK_ACCESS = 0b0000_1000;
        /// May run for as long as the caller's timeout allows
        const LONG_RUNNING = 0b0001_0000;
    }
}

impl ToolCapabilities {
    /// Check if tool spawns processes
    #[must_use]
    pub const fn executes_commands(self) -> bool {
        self.contains(Self::EXECUTES_COMMANDS)
    }

    /// Check if tool talks to the network
    #[must_use]
    pub const fn uses_network(self) -> bool {
        self.contains(Self::NETWORK_ACCESS)
    }

    /// Get a description of all enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = self
            .iter_names()
            .map(|(name, _)| match name {
                "EXECUTES_COMMANDS" => "executes_commands",
                "READS_HOST_STATE" => "reads_host_state",
                "READS_ENVIRONMENT" => "reads_environment",
                "NETWORK_ACCESS" => "network_access",
                "LONG_RUNNING" => "long_running",
                other => other,
            })
            .collect();

        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ")
        }
    }
}

/// The trait every gateway tool implements.
///
/// Tools are `Send + Sync` and shared behind `Arc` by the registry. `name()`
/// returns `&'static str` so lookups never allocate.
///
/// # Example
///
/// ```rust,no_run
/// use std::collections::BTreeMap;
///
/// use async_trait::async_trait;
/// use mcpd::errors::AppResult;
/// use mcpd::mcp::schema::JsonSchema;
/// use mcpd::tools::{McpTool, ToolCapabilities, ToolExecutionContext, ToolResult};
/// use serde_json::Value;
///
/// struct UptimeTool;
///
/// #[async_trait]
/// impl McpTool for UptimeTool {
///     fn name(&self) -> &'static str {
///         "uptime"
///     }
///
///     fn description(&self) -> &'static str {
///         "Report how long the gateway has been running"
///     }
///
///     fn input_schema(&self) -> JsonSchema {
///         JsonSchema::object(BTreeMap::new(), &[])
///     }
///
///     fn capabilities(&self) -> ToolCapabilities {
///         ToolCapabilities::READS_HOST_STATE
///     }
///
///     async fn execute(&self, _args: Value, _context: &ToolExecutionContext) -> AppResult<ToolResult> {
///         Ok(ToolResult::ok(serde_json::json!({"uptime_secs": 0})))
///     }
/// }
/// ```
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique identifier for the tool (e.g., `console`)
    fn name(&self) -> &'static str;

    /// Human-readable description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    ///
    /// Returned by the listing endpoints and compiled by the registry to
    /// validate every call.
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute the tool with already validated arguments
    ///
    /// # Errors
    ///
    /// Returns `AppError` with `InvalidInput` for semantic argument problems,
    /// any other code for execution failures
    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult>;
}
