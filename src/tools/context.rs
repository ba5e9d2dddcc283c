// ABOUTME: Defines ToolExecutionContext, the per-call identity handed to every tool
// ABOUTME: Carries the request id and the caller's key prefix for logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Instant;

use crate::middleware::{AuthenticatedKey, RequestId};

/// Context provided to every tool execution
#[derive(Debug, Clone)]
pub struct ToolExecutionContext {
    /// Request correlation id
    pub request_id: String,
    /// Display prefix of the caller's API key, if the route was authenticated
    pub key_prefix: Option<String>,
    /// When the call entered the dispatcher
    pub started_at: Instant,
}

impl ToolExecutionContext {
    /// Create a context for a request
    #[must_use]
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            key_prefix: None,
            started_at: Instant::now(),
        }
    }

    /// Build a context from the extensions the middleware stack attached
    #[must_use]
    pub fn from_request(request_id: Option<&RequestId>, key: Option<&AuthenticatedKey>) -> Self {
        let mut context = request_id.map_or_else(
            || Self::new(RequestId::generate().0),
            |id| Self::new(id.0.clone()),
        );
        context.key_prefix = key.map(|k| k.key_prefix.clone());
        context
    }

    /// Attach the caller's key prefix
    #[must_use]
    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(key_prefix.into());
        self
    }

    /// Key prefix for logging, `anonymous` when unauthenticated
    #[must_use]
    pub fn caller(&self) -> &str {
        self.key_prefix.as_deref().unwrap_or("anonymous")
    }
}
