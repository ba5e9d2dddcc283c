// ABOUTME: Defines ToolResult, the value a tool hands back to the dispatcher
// ABOUTME: Bridges tool implementations with the MCP CallToolResult envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;
use serde_json::Value;

use crate::mcp::schema::ToolResponse;

/// Result returned by tool execution
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// The result value to return to the client
    pub content: Value,
}

impl ToolResult {
    /// Create a simple successful result with just content
    #[must_use]
    pub const fn ok(content: Value) -> Self {
        Self { content }
    }

    /// Create a result from a serializable value
    ///
    /// # Errors
    ///
    /// Returns the serialization error if the value cannot be converted to JSON
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::ok(serde_json::to_value(value)?))
    }

    /// Convert into the MCP `CallToolResult` envelope
    #[must_use]
    pub fn into_response(self) -> ToolResponse {
        ToolResponse::success(self.content)
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::ok(Value::Null)
    }
}
