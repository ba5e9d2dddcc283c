// ABOUTME: Built-in tool implementations, each behind its own Cargo feature
// ABOUTME: console (tools-console), system_info (tools-system), jsonapi (tools-http)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Shell command execution
#[cfg(feature = "tools-console")]
pub mod console;

/// Outbound HTTP requests
#[cfg(feature = "tools-http")]
pub mod jsonapi;

/// Host introspection
#[cfg(feature = "tools-system")]
pub mod system_info;

#[cfg(feature = "tools-console")]
pub use console::ConsoleTool;
#[cfg(feature = "tools-http")]
pub use jsonapi::JsonApiTool;
#[cfg(feature = "tools-system")]
pub use system_info::SystemInfoTool;
