// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Assigns or propagates x-request-id and wraps each request in a span

use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{field, info, info_span, Instrument, Span};
use uuid::Uuid;

use crate::constants::headers;

/// Request id carried through handlers as a request extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a fresh request id
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("req_{}", Uuid::new_v4().simple()))
    }
}

/// Create a tracing span for HTTP requests
pub fn create_request_span(method: &str, path: &str, request_id: &str) -> Span {
    info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id,
        status_code = field::Empty,
        duration_ms = field::Empty,
    )
}

/// Create a tracing span for MCP tool operations
pub fn create_mcp_span(operation: &str, tool_name: &str) -> Span {
    info_span!(
        "mcp_operation",
        operation = %operation,
        tool_name = %tool_name,
        duration_ms = field::Empty,
        success = field::Empty,
        outcome = field::Empty,
    )
}

/// Axum middleware: request id propagation plus one span per request
pub async fn request_tracing(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(headers::X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map_or_else(RequestId::generate, |v| RequestId(v.to_owned()));

    let span = create_request_span(
        request.method().as_str(),
        request.uri().path(),
        &request_id.0,
    );
    request.extensions_mut().insert(request_id.clone());

    let started = Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;
    let duration_ms = started.elapsed().as_millis() as u64;

    span.record("status_code", response.status().as_u16());
    span.record("duration_ms", duration_ms);
    span.in_scope(|| {
        info!(
            status = response.status().as_u16(),
            duration_ms, "Request completed"
        );
    });

    if let Ok(value) = HeaderValue::from_str(&request_id.0) {
        response.headers_mut().insert(headers::X_REQUEST_ID, value);
    }
    response
}
