// ABOUTME: Integration tests for tool registration, lookup and listing
// ABOUTME: Duplicate rejection, stable order and built-in tool descriptors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use helpers::test_tools::{ArgsTool, BrokenSchemaTool, EchoTool, FailingTool};
use mcpd::errors::ToolError;
use mcpd::tools::{ToolCapabilities, ToolRegistry};

#[test]
fn test_duplicate_names_are_rejected() {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(EchoTool)).unwrap();

    let err = registry.register(Arc::new(EchoTool)).unwrap_err();
    assert_eq!(err, ToolError::already_registered("echo"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_listing_follows_registration_order() {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(FailingTool)).unwrap();
    registry.register(Arc::new(EchoTool)).unwrap();
    registry.register(Arc::new(ArgsTool)).unwrap();

    assert_eq!(registry.names(), vec!["failing", "echo", "args"]);
    let schemas = registry.schemas();
    assert_eq!(schemas[1].name, "echo");
    assert_eq!(schemas[1].description, "Echo the message back");
    assert_eq!(
        schemas[1].input_schema.required.as_deref(),
        Some(&["message".to_owned()][..])
    );
}

#[test]
fn test_unknown_name_is_not_found() {
    let registry = ToolRegistry::new();
    assert!(registry.is_empty());
    assert!(!registry.contains("ghost"));
    assert_eq!(
        registry.get("ghost").unwrap_err(),
        ToolError::not_found("ghost")
    );
}

#[test]
fn test_uncompilable_schema_is_rejected() {
    let mut registry = ToolRegistry::new();
    let err = registry.register(Arc::new(BrokenSchemaTool)).unwrap_err();
    assert!(matches!(err, ToolError::InvalidSchema { .. }));
    assert!(!registry.contains("broken_schema"));
}

#[test]
fn test_builtin_tools_are_registered() {
    let registry = ToolRegistry::with_builtin_tools(&common::test_config()).unwrap();

    assert_eq!(registry.names(), vec!["console", "system_info", "jsonapi"]);

    let console = registry.get("console").unwrap();
    assert!(console.tool().capabilities().executes_commands());
    let schema = console.schema().input_schema.to_value();
    assert_eq!(schema["required"], serde_json::json!(["command"]));
    assert_eq!(schema["additionalProperties"], false);
    assert_eq!(schema["properties"]["timeout"]["default"], 30.0);

    let jsonapi = registry.get("jsonapi").unwrap();
    assert!(jsonapi.tool().capabilities().uses_network());
    assert!(!registry
        .get("system_info")
        .unwrap()
        .tool()
        .capabilities()
        .contains(ToolCapabilities::EXECUTES_COMMANDS));
}

#[test]
fn test_legacy_terminal_name_is_not_registered() {
    let registry = ToolRegistry::with_builtin_tools(&common::test_config()).unwrap();

    assert!(!registry.contains("terminal"));
    assert!(matches!(
        registry.get("terminal").unwrap_err(),
        ToolError::NotFound { .. }
    ));
    assert!(registry.contains("console"));
}
