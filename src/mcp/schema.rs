// ABOUTME: MCP protocol schema types for tool discovery, invocation and initialization
// ABOUTME: Serde models matching the MCP 2024-11-05 wire format
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! MCP wire types.
//!
//! Field names follow the protocol's camelCase (`inputSchema`, `isError`,
//! `structuredContent`, `protocolVersion`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::protocol;

/// Server identification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

/// Tool-related server capability
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolsCapability {
    /// Whether the tool list can change at runtime
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Capabilities advertised during initialization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerCapabilities {
    /// Tool support
    pub tools: ToolsCapability,
}

/// Response to `initialize`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitializeResponse {
    /// Protocol revision
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server capabilities
    pub capabilities: ServerCapabilities,
    /// Server identification
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

impl InitializeResponse {
    /// The gateway's initialize payload. The tool list is fixed at startup.
    #[must_use]
    pub fn new() -> Self {
        Self {
            protocol_version: protocol::MCP_PROTOCOL_VERSION.to_owned(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: protocol::SERVER_NAME.to_owned(),
                version: protocol::SERVER_VERSION.to_owned(),
            },
        }
    }
}

impl Default for InitializeResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Tool descriptor as listed to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolSchema {
    /// Unique tool name
    pub name: String,
    /// Human readable description
    pub description: String,
    /// JSON Schema of the arguments object
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonSchema,
}

/// Object schema describing a tool's arguments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonSchema {
    /// Always "object" for tool arguments
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Named properties, listed in name order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, PropertySchema>>,
    /// Names of required properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Whether unknown properties are accepted
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,
}

impl JsonSchema {
    /// An object schema with the given properties
    #[must_use]
    pub fn object(properties: BTreeMap<String, PropertySchema>, required: &[&str]) -> Self {
        Self {
            schema_type: "object".to_owned(),
            properties: Some(properties),
            required: (!required.is_empty())
                .then(|| required.iter().map(|r| (*r).to_owned()).collect()),
            additional_properties: Some(false),
        }
    }

    /// The schema as a JSON value, as fed to the validator
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Schema of a single property
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PropertySchema {
    /// JSON type; absent means any type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    /// Property description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Value used when the property is omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Allowed values
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Strict lower bound for numbers
    #[serde(
        rename = "exclusiveMinimum",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exclusive_minimum: Option<f64>,
    /// Minimum string length
    #[serde(rename = "minLength", default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
}

impl PropertySchema {
    /// A typed property with a description
    #[must_use]
    pub fn typed(property_type: &str, description: &str) -> Self {
        Self {
            property_type: Some(property_type.to_owned()),
            description: Some(description.to_owned()),
            ..Self::default()
        }
    }

    /// An untyped property with a description
    #[must_use]
    pub fn any(description: &str) -> Self {
        Self {
            description: Some(description.to_owned()),
            ..Self::default()
        }
    }

    /// Set the default value
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Restrict to an enumeration
    #[must_use]
    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Require numbers strictly greater than `minimum`
    #[must_use]
    pub const fn with_exclusive_minimum(mut self, minimum: f64) -> Self {
        self.exclusive_minimum = Some(minimum);
        self
    }

    /// Require strings of at least `length` characters
    #[must_use]
    pub const fn with_min_length(mut self, length: u64) -> Self {
        self.min_length = Some(length);
        self
    }
}

/// `tools/call` parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name
    pub name: String,
    /// Tool arguments; `null` or absent means no arguments
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// `tools/list` result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsListResponse {
    /// Registered tools in registration order
    pub tools: Vec<ToolSchema>,
}

/// `tools/call` result (`CallToolResult`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResponse {
    /// Content blocks
    pub content: Vec<Content>,
    /// Whether the call failed
    #[serde(rename = "isError")]
    pub is_error: bool,
    /// Machine-readable result
    #[serde(
        rename = "structuredContent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub structured_content: Option<Value>,
}

impl ToolResponse {
    /// A successful call carrying `result` both as text and as structured content
    #[must_use]
    pub fn success(result: Value) -> Self {
        let text = match &result {
            Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        };
        Self {
            content: vec![Content::Text { text }],
            is_error: false,
            structured_content: Some(result),
        }
    }

    /// A failed call with a message for the caller
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text {
                text: message.into(),
            }],
            is_error: true,
            structured_content: None,
        }
    }
}

/// Content block of a tool response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Content {
    /// Plain text
    #[serde(rename = "text")]
    Text {
        /// The text
        text: String,
    },
}
