// ABOUTME: Tool abstraction, registry, argument validation and dispatch
// ABOUTME: Built-in tools live in `implementations`, one Cargo feature each
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tools
//!
//! - [`McpTool`] - the trait every tool implements
//! - [`ToolRegistry`] - name lookup and ordered enumeration, built at startup
//! - [`Dispatcher`] - validation, invocation and outcome normalization

/// Per-call context
pub mod context;
/// Call routing and outcome normalization
pub mod dispatcher;
/// Built-in tools
pub mod implementations;
/// Tool registry
pub mod registry;
/// Tool results
pub mod result;
/// Tool trait and capability flags
pub mod traits;
/// Argument schema validation
pub mod validation;

pub use context::ToolExecutionContext;
pub use dispatcher::{Dispatcher, ToolOutcome};
pub use registry::{RegisteredTool, ToolRegistry};
pub use result::ToolResult;
pub use traits::{McpTool, ToolCapabilities};
pub use validation::ArgumentValidator;
