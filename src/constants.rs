// ABOUTME: System-wide constants re-exported from the core crate
// ABOUTME: Endpoints, protocol identifiers, key format and configuration defaults
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Constants Module
//!
//! Constants live in `mcpd-core` so the CLI, server and tests share one copy.

pub use mcpd_core::constants::*;
