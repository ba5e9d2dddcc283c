// ABOUTME: Core types and constants for the mcpd tool invocation gateway
// ABOUTME: Foundation crate with error handling, API key models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # mcpd Core
//!
//! Foundation crate providing shared types and constants for the mcpd gateway.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ToolError`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Persisted API key records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and default configuration values organized by domain
pub mod constants;

/// Core data models (API key records)
pub mod models;
