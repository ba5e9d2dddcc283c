// ABOUTME: System information tool reporting environment variables, time and process details
// ABOUTME: Read-only view of the gateway host, optionally filtered by environment prefix
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::env;
use std::process;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::constants::tools;
use crate::errors::{AppError, AppResult};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

/// Sections the caller can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoType {
    /// Environment variables
    Environment,
    /// Current UTC time
    Time,
    /// Server process details
    Process,
    /// Everything
    #[default]
    All,
}

impl InfoType {
    fn includes(self, section: Self) -> bool {
        self == Self::All || self == section
    }
}

#[derive(Debug, Deserialize)]
struct SystemInfoArgs {
    #[serde(default)]
    info_type: InfoType,
    filter_env: Option<String>,
}

/// Tool for getting system information
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInfoTool;

impl SystemInfoTool {
    fn environment(prefix: Option<&str>) -> Value {
        let vars: BTreeMap<String, String> = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.to_string_lossy().into_owned())))
            .filter(|(k, _)| prefix.map_or(true, |p| k.starts_with(p)))
            .collect();
        json!(vars)
    }

    fn time() -> Value {
        let now = Utc::now();
        #[allow(clippy::cast_precision_loss)]
        let timestamp = now.timestamp_micros() as f64 / 1_000_000.0;
        json!({
            "utc": now.to_rfc3339(),
            "timestamp": timestamp,
        })
    }

    fn process() -> Value {
        let cwd = env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_owned());
        let user = env::var("USER")
            .or_else(|_| env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_owned());
        json!({
            "pid": process::id(),
            "cwd": cwd,
            "user": user,
        })
    }
}

#[async_trait]
impl McpTool for SystemInfoTool {
    fn name(&self) -> &'static str {
        tools::SYSTEM_INFO
    }

    fn description(&self) -> &'static str {
        "Get system information including environment variables, current time, and process info"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = BTreeMap::new();
        properties.insert(
            "info_type".to_owned(),
            PropertySchema::typed("string", "Type of system information to retrieve")
                .with_enum(vec![
                    json!("environment"),
                    json!("time"),
                    json!("process"),
                    json!("all"),
                ])
                .with_default(json!("all")),
        );
        properties.insert(
            "filter_env".to_owned(),
            PropertySchema::typed(
                "string",
                "Filter environment variables by prefix (optional)",
            ),
        );
        JsonSchema::object(properties, &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_HOST_STATE | ToolCapabilities::READS_ENVIRONMENT
    }

    async fn execute(&self, args: Value, _context: &ToolExecutionContext) -> AppResult<ToolResult> {
        let args: SystemInfoArgs = serde_json::from_value(args)
            .map_err(|e| AppError::invalid_input(format!("Invalid system_info arguments: {e}")))?;

        let mut result = Map::new();
        if args.info_type.includes(InfoType::Environment) {
            result.insert(
                "environment".to_owned(),
                Self::environment(args.filter_env.as_deref()),
            );
        }
        if args.info_type.includes(InfoType::Time) {
            result.insert("time".to_owned(), Self::time());
        }
        if args.info_type.includes(InfoType::Process) {
            result.insert("process".to_owned(), Self::process());
        }
        Ok(ToolResult::ok(Value::Object(result)))
    }
}
