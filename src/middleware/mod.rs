// ABOUTME: HTTP middleware for request tracing and API key authentication
// ABOUTME: Provides request ID propagation, per-request spans, and the auth gate

/// API key authentication
pub mod auth;
/// Request id propagation and spans
pub mod tracing;

pub use auth::{
    require_api_key, unauthorized_response, ApiKeyAuthenticator, AuthFailure, AuthenticatedKey,
    CredentialSource,
};
pub use self::tracing::{create_mcp_span, create_request_span, request_tracing, RequestId};
