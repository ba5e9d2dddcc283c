// ABOUTME: Resolves, validates and invokes tools, normalizing every outcome
// ABOUTME: Tool errors and panics become typed outcomes that convert into the MCP CallToolResult envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Dispatcher
//!
//! `call` never fails: every path ends in a [`ToolOutcome`]. The tool body is
//! only entered once the arguments satisfy the tool's schema.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;
use serde_json::{Map, Value};
use tracing::{error, field, warn, Instrument};

use crate::errors::{AppError, ErrorCode, ToolError};
use crate::logging::AppLogger;
use crate::mcp::schema::ToolResponse;
use crate::middleware::create_mcp_span;

use super::context::ToolExecutionContext;
use super::registry::ToolRegistry;
use super::result::ToolResult;

/// Normalized result of a tool call
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// The tool ran and produced a result
    Success(ToolResult),
    /// No tool with this name is registered
    NotFound {
        /// Requested name
        tool_name: String,
    },
    /// Arguments were rejected before or by the tool
    InvalidArguments {
        /// Tool name
        tool_name: String,
        /// What was wrong
        violations: Vec<String>,
    },
    /// The tool failed or panicked
    ExecutionFailed {
        /// Tool name
        tool_name: String,
        /// Failure message safe to show the caller
        message: String,
    },
}

impl ToolOutcome {
    /// Whether the call succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Short label for logs
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::NotFound { .. } => "not_found",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::ExecutionFailed { .. } => "execution_failed",
        }
    }

    /// Convert into the MCP `CallToolResult` envelope
    #[must_use]
    pub fn into_response(self) -> ToolResponse {
        match self {
            Self::Success(result) => result.into_response(),
            other => match other.into_error() {
                Some(error) => ToolResponse::error(error.to_string()),
                None => ToolResponse::error("Unknown tool outcome"),
            },
        }
    }

    /// The failure as a [`ToolError`], `None` for successes
    #[must_use]
    pub fn into_error(self) -> Option<ToolError> {
        match self {
            Self::Success(_) => None,
            Self::NotFound { tool_name } => Some(ToolError::not_found(tool_name)),
            Self::InvalidArguments {
                tool_name,
                violations,
            } => Some(ToolError::invalid_arguments(tool_name, violations)),
            Self::ExecutionFailed { tool_name, message } => {
                Some(ToolError::execution_failed(tool_name, message))
            }
        }
    }

    /// The result for successes, an [`AppError`] otherwise
    ///
    /// # Errors
    ///
    /// Returns the failure mapped to its HTTP-facing error code
    pub fn into_result(self) -> Result<ToolResult, AppError> {
        match self {
            Self::Success(result) => Ok(result),
            other => Err(other
                .into_error()
                .map_or_else(|| AppError::internal("Unknown tool outcome"), AppError::from)),
        }
    }
}

/// Routes calls to registered tools
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    /// Create a dispatcher over a fully built registry
    #[must_use]
    pub const fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// The registry calls are resolved against
    #[must_use]
    pub const fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Invoke `tool_name` with `arguments`. `null` arguments mean `{}`.
    pub async fn call(
        &self,
        tool_name: &str,
        arguments: Value,
        context: &ToolExecutionContext,
    ) -> ToolOutcome {
        let span = create_mcp_span("tools/call", tool_name);
        let started = Instant::now();
        let outcome = self
            .dispatch(tool_name, arguments, context)
            .instrument(span.clone())
            .await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        span.record("duration_ms", duration_ms);
        span.record("success", outcome.is_success());
        span.record("outcome", field::display(outcome.label()));
        AppLogger::log_mcp_tool_call(
            context.caller(),
            tool_name,
            outcome.is_success(),
            duration_ms,
        );
        outcome
    }

    async fn dispatch(
        &self,
        tool_name: &str,
        arguments: Value,
        context: &ToolExecutionContext,
    ) -> ToolOutcome {
        let Ok(entry) = self.registry.get(tool_name) else {
            return ToolOutcome::NotFound {
                tool_name: tool_name.to_owned(),
            };
        };

        let arguments = match arguments {
            Value::Null => Value::Object(Map::new()),
            Value::Object(map) => Value::Object(map),
            other => {
                return ToolOutcome::InvalidArguments {
                    tool_name: tool_name.to_owned(),
                    violations: vec![format!(
                        "arguments must be a JSON object, got {}",
                        json_type(&other)
                    )],
                };
            }
        };

        if let Err(err) = entry.validator().validate(&arguments) {
            let violations = match err {
                ToolError::InvalidArguments { violations, .. } => violations,
                other => vec![other.to_string()],
            };
            return ToolOutcome::InvalidArguments {
                tool_name: tool_name.to_owned(),
                violations,
            };
        }

        let tool = Arc::clone(entry.tool());
        let execution = AssertUnwindSafe(tool.execute(arguments, context)).catch_unwind();
        match execution.await {
            Ok(Ok(result)) => ToolOutcome::Success(result),
            Ok(Err(err)) if is_argument_error(err.code) => {
                warn!(tool = tool_name, error = %err, "Tool rejected its arguments");
                ToolOutcome::InvalidArguments {
                    tool_name: tool_name.to_owned(),
                    violations: vec![err.message],
                }
            }
            Ok(Err(err)) => {
                error!(tool = tool_name, error = %err, "Tool execution failed");
                ToolOutcome::ExecutionFailed {
                    tool_name: tool_name.to_owned(),
                    message: err.message,
                }
            }
            Err(panic) => {
                let detail = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_owned())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic payload".to_owned());
                error!(tool = tool_name, panic = %detail, "Tool panicked");
                ToolOutcome::ExecutionFailed {
                    tool_name: tool_name.to_owned(),
                    message: "internal error while executing tool".to_owned(),
                }
            }
        }
    }
}

const fn is_argument_error(code: ErrorCode) -> bool {
    matches!(
        code,
        ErrorCode::InvalidInput | ErrorCode::MissingRequiredField | ErrorCode::ValueOutOfRange
    )
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
