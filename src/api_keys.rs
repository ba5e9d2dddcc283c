// ABOUTME: API key minting and hashing for request authentication
// ABOUTME: Generates high-entropy keys and derives the digests the key store persists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # API Key Management
//!
//! Keys are `mcpd_` followed by the unpadded URL-safe base64 encoding of
//! random bytes drawn from the operating system CSPRNG. Only the SHA-256
//! digest and a short display prefix are ever stored.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::constants::key_format;

/// A plaintext API key.
///
/// `Debug` is redacted so the key cannot leak through logging of containing
/// structs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key string
    #[must_use]
    pub const fn new(key: String) -> Self {
        Self(key)
    }

    /// The plaintext key. Only hand this to the caller who minted it.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Consume into the plaintext key
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Display prefix, safe to log
    #[must_use]
    pub fn prefix(&self) -> String {
        ApiKeyManager::extract_key_prefix(&self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({}…)", self.prefix())
    }
}

/// Freshly minted key with its derived storage fields
#[derive(Debug, Clone)]
pub struct ApiKeyData {
    /// The plaintext key, returned once to the caller
    pub full_key: ApiKey,
    /// Display prefix persisted for identification
    pub key_prefix: String,
    /// Hex SHA-256 digest persisted for lookup
    pub key_hash: String,
}

/// API Key Manager
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyManager {
    key_bytes: usize,
}

impl Default for ApiKeyManager {
    fn default() -> Self {
        Self::new(key_format::MIN_KEY_BYTES)
    }
}

impl ApiKeyManager {
    /// Create a manager drawing `key_bytes` random bytes per key.
    ///
    /// Values below 32 bytes are raised to 32.
    #[must_use]
    pub fn new(key_bytes: usize) -> Self {
        Self {
            key_bytes: key_bytes.max(key_format::MIN_KEY_BYTES),
        }
    }

    /// Random bytes drawn per key
    #[must_use]
    pub const fn key_bytes(&self) -> usize {
        self.key_bytes
    }

    /// Generate a new API key
    #[must_use]
    pub fn generate_api_key(&self) -> ApiKeyData {
        let mut random_bytes = vec![0_u8; self.key_bytes];
        OsRng.fill_bytes(&mut random_bytes);

        let full_key = format!(
            "{}{}",
            key_format::KEY_PREFIX,
            URL_SAFE_NO_PAD.encode(&random_bytes)
        );

        ApiKeyData {
            key_prefix: Self::extract_key_prefix(&full_key),
            key_hash: Self::hash_key(&full_key),
            full_key: ApiKey::new(full_key),
        }
    }

    /// Extract the display prefix from a full key
    #[must_use]
    pub fn extract_key_prefix(api_key: &str) -> String {
        api_key
            .chars()
            .take(key_format::DISPLAY_PREFIX_LEN)
            .collect()
    }

    /// Hash an API key for storage and comparison
    #[must_use]
    pub fn hash_key(api_key: &str) -> String {
        format!("{:x}", Sha256::digest(api_key.as_bytes()))
    }
}
