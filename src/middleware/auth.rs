// ABOUTME: API key authentication middleware applied to every route except exact exempt paths
// ABOUTME: Extracts a credential (Bearer, X-API-Key, api_key query) and checks it against the key store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Request Authentication
//!
//! Credential lookup order is fixed and total:
//!
//! 1. `Authorization: Bearer <key>`
//! 2. `X-API-Key: <key>`
//! 3. `api_key=<key>` query parameter
//!
//! The first source present is the one checked; later sources are not
//! consulted when an earlier one carries a (possibly wrong) key. Missing and
//! invalid credentials are logged differently but produce the same 401
//! response, so callers cannot probe which keys exist.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, field, Span};
use url::form_urlencoded;

use crate::api_keys::ApiKeyManager;
use crate::constants::{headers as header_names, messages};
use crate::key_store::KeyStore;
use crate::logging::AppLogger;

/// Where a credential was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// `Authorization: Bearer`
    BearerHeader,
    /// `X-API-Key`
    ApiKeyHeader,
    /// `api_key` query parameter
    QueryParameter,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BearerHeader => write!(f, "bearer"),
            Self::ApiKeyHeader => write!(f, "x-api-key"),
            Self::QueryParameter => write!(f, "query"),
        }
    }
}

/// Why a request was rejected. Never exposed to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No credential in any supported location
    Missing,
    /// A credential was supplied but is not a known key
    Invalid {
        /// Where the rejected credential came from
        source: CredentialSource,
    },
}

/// Identity attached to authenticated requests as an extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedKey {
    /// Display prefix of the key, safe to log
    pub key_prefix: String,
    /// Where the key was found
    pub source: CredentialSource,
}

/// Request-boundary gate checking API keys against the [`KeyStore`]
#[derive(Debug, Clone)]
pub struct ApiKeyAuthenticator {
    key_store: Arc<KeyStore>,
    exempt_paths: Arc<HashSet<String>>,
}

impl ApiKeyAuthenticator {
    /// Create an authenticator. `exempt_paths` are matched exactly.
    pub fn new(key_store: Arc<KeyStore>, exempt_paths: impl IntoIterator<Item = String>) -> Self {
        Self {
            key_store,
            exempt_paths: Arc::new(exempt_paths.into_iter().collect()),
        }
    }

    /// Whether `path` is served without a credential
    #[must_use]
    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt_paths.contains(path)
    }

    /// Find the credential a request carries, in lookup order
    #[must_use]
    pub fn extract_credential(
        headers: &HeaderMap,
        query: Option<&str>,
    ) -> Option<(String, CredentialSource)> {
        let bearer = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| {
                let (scheme, token) = v.trim().split_once(' ')?;
                scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
            })
            .filter(|token| !token.is_empty());
        if let Some(token) = bearer {
            return Some((token.to_owned(), CredentialSource::BearerHeader));
        }

        let header_key = headers
            .get(header_names::X_API_KEY)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|key| !key.is_empty());
        if let Some(key) = header_key {
            return Some((key.to_owned(), CredentialSource::ApiKeyHeader));
        }

        query.and_then(|q| {
            form_urlencoded::parse(q.as_bytes())
                .find(|(name, _)| name == header_names::API_KEY_QUERY_PARAM)
                .map(|(_, value)| value.trim().to_owned())
                .filter(|key| !key.is_empty())
                .map(|key| (key, CredentialSource::QueryParameter))
        })
    }

    /// Authenticate a request. Has no side effects beyond cache warming.
    ///
    /// # Errors
    ///
    /// Returns [`AuthFailure`] when no credential is present or it is unknown
    #[tracing::instrument(
        skip(self, headers, query),
        fields(auth_source = field::Empty, success = field::Empty)
    )]
    pub async fn authenticate(
        &self,
        headers: &HeaderMap,
        query: Option<&str>,
    ) -> Result<AuthenticatedKey, AuthFailure> {
        let Some((candidate, source)) = Self::extract_credential(headers, query) else {
            Span::current().record("success", false);
            return Err(AuthFailure::Missing);
        };
        Span::current().record("auth_source", field::display(source));

        // Security: never log the candidate itself
        if self.key_store.contains(&candidate).await {
            Span::current().record("success", true);
            debug!(%source, "API key accepted");
            Ok(AuthenticatedKey {
                key_prefix: ApiKeyManager::extract_key_prefix(&candidate),
                source,
            })
        } else {
            Span::current().record("success", false);
            Err(AuthFailure::Invalid { source })
        }
    }
}

/// The single response every authentication failure produces
#[must_use]
pub fn unauthorized_response() -> Response {
    let mut response = (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": messages::INVALID_API_KEY })),
    )
        .into_response();
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}

/// Axum middleware enforcing API key authentication
pub async fn require_api_key(
    State(authenticator): State<ApiKeyAuthenticator>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    if authenticator.is_exempt(&path) {
        return next.run(request).await;
    }

    let result = authenticator
        .authenticate(request.headers(), request.uri().query())
        .await;

    match result {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(AuthFailure::Missing) => {
            AppLogger::log_security_event(
                "auth_missing",
                "low",
                &format!("No API key supplied for {} {path}", request.method()),
            );
            unauthorized_response()
        }
        Err(AuthFailure::Invalid { source }) => {
            AppLogger::log_security_event(
                "auth_invalid",
                "medium",
                &format!(
                    "Unknown API key via {source} for {} {path}",
                    request.method()
                ),
            );
            unauthorized_response()
        }
    }
}
