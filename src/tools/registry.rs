// ABOUTME: Registry of MCP tools with reject-on-duplicate registration and stable ordering
// ABOUTME: Compiles each tool's argument schema once and exposes schemas for the listing endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Registry
//!
//! Built once at startup from an explicit list (see
//! [`ToolRegistry::register_builtin_tools`]) and shared read-only behind an
//! `Arc` afterwards. Enumeration follows registration order.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::errors::ToolError;
use crate::mcp::schema::ToolSchema;

use super::traits::McpTool;
use super::validation::ArgumentValidator;

/// A tool together with its compiled argument schema
#[derive(Clone)]
pub struct RegisteredTool {
    tool: Arc<dyn McpTool>,
    validator: Arc<ArgumentValidator>,
}

impl RegisteredTool {
    /// The tool
    #[must_use]
    pub fn tool(&self) -> &Arc<dyn McpTool> {
        &self.tool
    }

    /// The compiled argument schema
    #[must_use]
    pub fn validator(&self) -> &ArgumentValidator {
        &self.validator
    }

    /// Tool name
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.tool.name()
    }

    /// Listing entry for MCP clients
    #[must_use]
    pub fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.tool.name().to_owned(),
            description: self.tool.description().to_owned(),
            input_schema: self.tool.input_schema(),
        }
    }
}

impl fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("name", &self.tool.name())
            .field("capabilities", &self.tool.capabilities())
            .finish()
    }
}

/// Name-to-tool mapping with registration order preserved
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in tool enabled at compile time
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in tool's schema does not compile
    pub fn with_builtin_tools(config: &ServerConfig) -> Result<Self, ToolError> {
        let mut registry = Self::new();
        registry.register_builtin_tools(config)?;
        Ok(registry)
    }

    /// Register a tool.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::AlreadyRegistered`] if the name is taken, or
    /// [`ToolError::InvalidSchema`] if the tool's schema does not compile
    pub fn register(&mut self, tool: Arc<dyn McpTool>) -> Result<(), ToolError> {
        let name = tool.name();
        if self.index.contains_key(name) {
            return Err(ToolError::already_registered(name));
        }

        let validator = ArgumentValidator::compile(name, &tool.input_schema())?;
        debug!(
            "Registering tool '{}' with capabilities: {}",
            name,
            tool.capabilities().describe()
        );
        self.index.insert(name, self.tools.len());
        self.tools.push(RegisteredTool {
            tool,
            validator: Arc::new(validator),
        });
        Ok(())
    }

    /// Register the built-in tools enabled by Cargo features, in listing order
    ///
    /// # Errors
    ///
    /// Returns an error if any built-in tool fails to register
    pub fn register_builtin_tools(&mut self, config: &ServerConfig) -> Result<(), ToolError> {
        #[cfg(feature = "tools-console")]
        {
            use super::implementations::ConsoleTool;
            use crate::process::ProcessRunner;
            self.register(Arc::new(ConsoleTool::new(ProcessRunner::new(
                config.console.clone(),
            ))))?;
        }

        #[cfg(feature = "tools-system")]
        {
            use super::implementations::SystemInfoTool;
            self.register(Arc::new(SystemInfoTool))?;
        }

        #[cfg(feature = "tools-http")]
        {
            use super::implementations::JsonApiTool;
            self.register(Arc::new(JsonApiTool::new(&config.http_tool)?))?;
        }

        #[cfg(not(any(
            feature = "tools-console",
            feature = "tools-system",
            feature = "tools-http"
        )))]
        let _ = config;

        info!(count = self.tools.len(), tools = ?self.names(), "Registered built-in tools");
        Ok(())
    }

    /// Look up a tool by name
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::NotFound`] for unknown names
    pub fn get(&self, name: &str) -> Result<&RegisteredTool, ToolError> {
        self.index
            .get(name)
            .and_then(|&i| self.tools.get(i))
            .ok_or_else(|| ToolError::not_found(name))
    }

    /// Whether a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All tools in registration order
    #[must_use]
    pub fn list(&self) -> &[RegisteredTool] {
        &self.tools
    }

    /// Tool names in registration order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(RegisteredTool::name).collect()
    }

    /// Listing entries in registration order
    #[must_use]
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(RegisteredTool::schema).collect()
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tool is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
