// ABOUTME: Minimal McpTool implementations for registry and dispatcher tests
// ABOUTME: Echo, failing, panicking and call-counting tools

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use mcpd::errors::{AppError, AppResult};
use mcpd::mcp::schema::{JsonSchema, PropertySchema};
use mcpd::tools::{McpTool, ToolCapabilities, ToolExecutionContext, ToolResult};
use serde_json::{json, Value};

/// Echoes its `message` argument back, with the caller's key prefix
pub struct EchoTool;

#[async_trait]
impl McpTool for EchoTool {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn description(&self) -> &'static str {
        "Echo the message back"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = BTreeMap::new();
        properties.insert(
            "message".to_owned(),
            PropertySchema::typed("string", "Text to echo"),
        );
        properties.insert(
            "repeat".to_owned(),
            PropertySchema::typed("integer", "How many times").with_default(json!(1)),
        );
        JsonSchema::object(properties, &["message"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::empty()
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult> {
        Ok(ToolResult::ok(json!({
            "message": args["message"],
            "caller": context.caller(),
        })))
    }
}

/// Takes no arguments and reports what it received
pub struct ArgsTool;

#[async_trait]
impl McpTool for ArgsTool {
    fn name(&self) -> &'static str {
        "args"
    }

    fn description(&self) -> &'static str {
        "Return the received arguments"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(BTreeMap::new(), &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::empty()
    }

    async fn execute(&self, args: Value, _context: &ToolExecutionContext) -> AppResult<ToolResult> {
        Ok(ToolResult::ok(json!({ "received": args })))
    }
}

/// Always fails with an internal error
pub struct FailingTool;

#[async_trait]
impl McpTool for FailingTool {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn description(&self) -> &'static str {
        "Always fails"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(BTreeMap::new(), &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::empty()
    }

    async fn execute(&self, _args: Value, _context: &ToolExecutionContext) -> AppResult<ToolResult> {
        Err(AppError::internal("disk on fire"))
    }
}

/// Rejects its arguments from inside the tool body
pub struct PickyTool;

#[async_trait]
impl McpTool for PickyTool {
    fn name(&self) -> &'static str {
        "picky"
    }

    fn description(&self) -> &'static str {
        "Rejects every call as invalid input"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(BTreeMap::new(), &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::empty()
    }

    async fn execute(&self, _args: Value, _context: &ToolExecutionContext) -> AppResult<ToolResult> {
        Err(AppError::invalid_input("value not acceptable"))
    }
}

/// Panics when executed
pub struct PanicTool;

#[async_trait]
impl McpTool for PanicTool {
    fn name(&self) -> &'static str {
        "panic"
    }

    fn description(&self) -> &'static str {
        "Panics when called"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(BTreeMap::new(), &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::empty()
    }

    async fn execute(&self, _args: Value, _context: &ToolExecutionContext) -> AppResult<ToolResult> {
        panic!("tool exploded");
    }
}

/// Counts invocations; requires an integer `n`
#[derive(Default)]
pub struct CountingTool {
    pub calls: Arc<AtomicUsize>,
}

impl CountingTool {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl McpTool for CountingTool {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn description(&self) -> &'static str {
        "Counts how often it runs"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = BTreeMap::new();
        properties.insert("n".to_owned(), PropertySchema::typed("integer", "A number"));
        JsonSchema::object(properties, &["n"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::empty()
    }

    async fn execute(&self, args: Value, _context: &ToolExecutionContext) -> AppResult<ToolResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ToolResult::ok(json!({ "n": args["n"] })))
    }
}

/// Declares a schema that does not compile
pub struct BrokenSchemaTool;

#[async_trait]
impl McpTool for BrokenSchemaTool {
    fn name(&self) -> &'static str {
        "broken_schema"
    }

    fn description(&self) -> &'static str {
        "Declares an unusable schema"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = BTreeMap::new();
        properties.insert(
            "x".to_owned(),
            PropertySchema::typed("not-a-type", "Bogus type"),
        );
        JsonSchema::object(properties, &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::empty()
    }

    async fn execute(&self, _args: Value, _context: &ToolExecutionContext) -> AppResult<ToolResult> {
        Ok(ToolResult::default())
    }
}
