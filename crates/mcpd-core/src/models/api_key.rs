// ABOUTME: API key record types persisted by the key store
// ABOUTME: Only digests and display prefixes are stored, never the plaintext key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted API key, as visible to operators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiKeyRecord {
    /// Insertion sequence number
    pub id: i64,
    /// Leading characters of the key, for identification in logs
    pub key_prefix: String,
    /// Hex SHA-256 of the full key
    #[serde(skip_serializing, default)]
    pub key_hash: String,
    /// When the key was minted
    pub created_at: DateTime<Utc>,
}

/// Response body of the key generation endpoint.
///
/// The plaintext key appears here and nowhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedKeyResponse {
    /// The new key
    pub api_key: String,
    /// Confirmation message
    pub message: String,
}
