// ABOUTME: Durable, concurrency-safe set of valid API keys backed by SQLite
// ABOUTME: In-memory digest cache reconciled against the database on every miss
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Key Store
//!
//! The key store is the only shared mutable state in the gateway.
//!
//! - Reads go to an in-memory set of SHA-256 digests. A miss is checked
//!   against the database before being trusted, so keys minted by another
//!   process (for example `mcpd-cli generate-key`) are accepted without a
//!   restart.
//! - Writes are serialized through a single async mutex and reach the
//!   database before the in-memory set, so a key is never handed out unless
//!   it was durably recorded.

use std::collections::HashSet;

use chrono::Utc;
use mcpd_core::models::ApiKeyRecord;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::api_keys::{ApiKey, ApiKeyManager};
use crate::config::DatabaseUrl;
use crate::database::Database;
use crate::errors::AppResult;

/// Durable set of valid API keys
#[derive(Debug)]
pub struct KeyStore {
    database: Database,
    manager: ApiKeyManager,
    known: RwLock<HashSet<String>>,
    writer: Mutex<()>,
}

impl KeyStore {
    /// Open the store at `url` and load the persisted digests.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened even after a corrupt
    /// file has been moved aside
    pub async fn open(url: &DatabaseUrl, manager: ApiKeyManager) -> AppResult<Self> {
        let database = Database::new(url).await?;
        let store = Self::with_database(database, manager);
        store.load().await;
        Ok(store)
    }

    /// Wrap an already opened database. Call [`KeyStore::load`] to warm the cache.
    #[must_use]
    pub fn with_database(database: Database, manager: ApiKeyManager) -> Self {
        Self {
            database,
            manager,
            known: RwLock::new(HashSet::new()),
            writer: Mutex::new(()),
        }
    }

    /// Reload the in-memory view from the database and return it.
    ///
    /// An unreadable store is logged and reported as empty; the previous
    /// in-memory view is kept in that case.
    pub async fn load(&self) -> HashSet<String> {
        match self.database.list_api_key_hashes().await {
            Ok(hashes) => {
                let loaded: HashSet<String> = hashes.into_iter().collect();
                debug!(count = loaded.len(), "Loaded API key digests");
                *self.known.write().await = loaded.clone();
                loaded
            }
            Err(e) => {
                warn!("Failed to load API keys, treating store as empty: {e}");
                HashSet::new()
            }
        }
    }

    /// Whether `candidate` is a valid key.
    ///
    /// Storage errors fail closed.
    pub async fn contains(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }
        let digest = ApiKeyManager::hash_key(candidate);

        if self.known.read().await.contains(&digest) {
            return true;
        }

        match self.database.api_key_hash_exists(&digest).await {
            Ok(true) => {
                debug!("API key found in database but not in cache, caching it");
                self.known.write().await.insert(digest);
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!("API key lookup failed, rejecting credential: {e}");
                false
            }
        }
    }

    /// Mint, persist and return a new key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key could not be written to the database; in
    /// that case the key is not valid and is not returned.
    pub async fn generate(&self) -> AppResult<ApiKey> {
        let _writer = self.writer.lock().await;

        let data = self.manager.generate_api_key();
        self.database
            .insert_api_key(&data.key_hash, &data.key_prefix, Utc::now())
            .await?;
        self.known.write().await.insert(data.key_hash);

        info!(key_prefix = %data.key_prefix, "Generated new API key");
        Ok(data.full_key)
    }

    /// Generate an initial key when the store is empty.
    ///
    /// The key is logged once so an operator can pick it up from the first
    /// start's output.
    ///
    /// # Errors
    ///
    /// Returns an error if counting or generation fails
    pub async fn bootstrap(&self) -> AppResult<Option<ApiKey>> {
        if self.database.count_api_keys().await? > 0 {
            return Ok(None);
        }
        let key = self.generate().await?;
        warn!(
            "No API keys found. Generated initial API key: {} (store it now, it will not be shown again)",
            key.expose()
        );
        Ok(Some(key))
    }

    /// Number of persisted keys
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn len(&self) -> AppResult<u64> {
        self.database.count_api_keys().await
    }

    /// Whether no key has been issued
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn is_empty(&self) -> AppResult<bool> {
        Ok(self.len().await? == 0)
    }

    /// Key records in insertion order, for operators
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self) -> AppResult<Vec<ApiKeyRecord>> {
        self.database.list_api_keys().await
    }

    /// Readiness probe
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable
    pub async fn ping(&self) -> AppResult<()> {
        self.database.ping().await
    }

    /// The backing database
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }
}
