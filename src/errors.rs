// ABOUTME: Unified error handling re-exported from the core crate
// ABOUTME: AppError, ErrorCode, ErrorResponse and ToolError
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Unified Error Handling System
//!
//! Error types live in `mcpd-core`, with the axum `IntoResponse` impl enabled
//! through its `http-response` feature.

pub use mcpd_core::errors::*;
