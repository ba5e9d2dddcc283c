// ABOUTME: Tool-specific error types for registry, argument validation and execution
// ABOUTME: Provides structured errors that integrate with the main AppError system
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Error Types
//!
//! - `ToolError` - Errors specific to tool lookup, registration, argument
//!   validation and execution
//! - Conversion to `AppError` for HTTP response formatting

use serde_json::json;
use thiserror::Error;

use super::{AppError, ErrorCode};

/// Errors specific to tool operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Tool was not found in the registry
    #[error("Tool '{tool_name}' not found")]
    NotFound {
        /// Name of the requested tool
        tool_name: String,
    },
    /// Arguments did not satisfy the tool's declared schema
    #[error("Invalid arguments for tool '{tool_name}': {}", violations.join("; "))]
    InvalidArguments {
        /// Name of the tool
        tool_name: String,
        /// One entry per schema violation
        violations: Vec<String>,
    },
    /// Tool execution failed
    #[error("Tool '{tool_name}' execution failed: {details}")]
    ExecutionFailed {
        /// Name of the tool that failed
        tool_name: String,
        /// Details about the failure
        details: String,
    },
    /// Tool is already registered
    #[error("Tool '{tool_name}' is already registered")]
    AlreadyRegistered {
        /// Name of the already-registered tool
        tool_name: String,
    },
    /// Tool declared a parameter schema that does not compile
    #[error("Tool '{tool_name}' declares an invalid schema: {reason}")]
    InvalidSchema {
        /// Name of the tool
        tool_name: String,
        /// Compiler message
        reason: String,
    },
}

impl ToolError {
    /// Create a "not found" error
    #[must_use]
    pub fn not_found(tool_name: impl Into<String>) -> Self {
        Self::NotFound {
            tool_name: tool_name.into(),
        }
    }

    /// Create an "invalid arguments" error from schema violations
    #[must_use]
    pub fn invalid_arguments(tool_name: impl Into<String>, violations: Vec<String>) -> Self {
        Self::InvalidArguments {
            tool_name: tool_name.into(),
            violations,
        }
    }

    /// Create an "execution failed" error
    #[must_use]
    pub fn execution_failed(tool_name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            tool_name: tool_name.into(),
            details: details.into(),
        }
    }

    /// Create an "already registered" error
    #[must_use]
    pub fn already_registered(tool_name: impl Into<String>) -> Self {
        Self::AlreadyRegistered {
            tool_name: tool_name.into(),
        }
    }

    /// Create an "invalid schema" error
    #[must_use]
    pub fn invalid_schema(tool_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            tool_name: tool_name.into(),
            reason: reason.into(),
        }
    }
}

impl From<ToolError> for AppError {
    fn from(error: ToolError) -> Self {
        let code = match &error {
            ToolError::NotFound { .. } => ErrorCode::ResourceNotFound,
            ToolError::InvalidArguments { .. } => ErrorCode::InvalidInput,
            ToolError::ExecutionFailed { .. } => ErrorCode::ToolExecutionFailed,
            ToolError::AlreadyRegistered { .. } => ErrorCode::ResourceAlreadyExists,
            ToolError::InvalidSchema { .. } => ErrorCode::ConfigInvalid,
        };
        let details = match &error {
            ToolError::InvalidArguments { violations, .. } => {
                Some(json!({ "violations": violations }))
            }
            _ => None,
        };
        let app_error = Self::new(code, error.to_string());
        match details {
            Some(details) => app_error.with_details(details),
            None => app_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let app_error: AppError = ToolError::not_found("ghost").into();
        assert_eq!(app_error.http_status(), 404);
        assert_eq!(app_error.message, "Tool 'ghost' not found");
    }

    #[test]
    fn test_invalid_arguments_carry_violations() {
        let error = ToolError::invalid_arguments(
            "console",
            vec!["\"command\" is a required property".to_owned()],
        );
        let app_error: AppError = error.into();
        assert_eq!(app_error.http_status(), 400);
        assert!(app_error.details.is_some());
    }
}
