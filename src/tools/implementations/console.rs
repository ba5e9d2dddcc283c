// ABOUTME: Console tool executing shell commands on the host through the ProcessRunner
// ABOUTME: Returns stdout, stderr, exit code and timeout/truncation flags as structured content
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Console Tool
//!
//! `console` runs its `command` argument through the host shell. Anyone
//! holding an API key can run anything the server's user can.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::constants::tools;
use crate::errors::{AppError, AppResult};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::process::{ExecutionRequest, ProcessRunner};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

#[derive(Debug, Deserialize)]
struct ConsoleArgs {
    command: String,
    timeout: Option<f64>,
    working_directory: Option<String>,
}

/// Tool for executing console commands on the host machine
#[derive(Debug, Clone)]
pub struct ConsoleTool {
    runner: ProcessRunner,
}

impl ConsoleTool {
    /// Create the tool around a configured runner
    #[must_use]
    pub const fn new(runner: ProcessRunner) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl McpTool for ConsoleTool {
    fn name(&self) -> &'static str {
        tools::CONSOLE
    }

    fn description(&self) -> &'static str {
        "Execute console commands on the host machine. Use with caution."
    }

    fn input_schema(&self) -> JsonSchema {
        let default_timeout = self.runner.config().default_timeout.as_secs_f64();
        let mut properties = BTreeMap::new();
        properties.insert(
            "command".to_owned(),
            PropertySchema::typed("string", "The console command to execute").with_min_length(1),
        );
        properties.insert(
            "timeout".to_owned(),
            PropertySchema::typed(
                "number",
                &format!("Timeout in seconds (default: {default_timeout})"),
            )
            .with_default(json!(default_timeout))
            .with_exclusive_minimum(0.0),
        );
        properties.insert(
            "working_directory".to_owned(),
            PropertySchema::typed(
                "string",
                "Working directory for command execution (optional)",
            ),
        );
        JsonSchema::object(properties, &["command"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::EXECUTES_COMMANDS | ToolCapabilities::LONG_RUNNING
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult> {
        let args: ConsoleArgs = serde_json::from_value(args)
            .map_err(|e| AppError::invalid_input(format!("Invalid console arguments: {e}")))?;

        info!(
            request_id = %context.request_id,
            caller = %context.caller(),
            command = %args.command,
            "Executing console command"
        );

        let mut request = ExecutionRequest::new(args.command);
        request.timeout_secs = args.timeout;
        request.working_directory = args.working_directory.map(Into::into);

        let result = self.runner.run(request).await?;
        Ok(ToolResult::from_serializable(&result)?)
    }
}
