// ABOUTME: API key persistence: digest insertion, lookup and listing
// ABOUTME: Only SHA-256 digests and display prefixes are written to disk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use mcpd_core::models::ApiKeyRecord;
use sqlx::sqlite::SqliteRow;
use sqlx::{Error as SqlxError, Row};

use super::Database;
use crate::errors::{AppError, AppResult};

impl Database {
    pub(super) async fn migrate_api_keys(&self) -> Result<(), SqlxError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS api_keys (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                key_hash TEXT NOT NULL UNIQUE,
                key_prefix TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a key digest, returning its sequence number
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including on a duplicate digest
    pub async fn insert_api_key(
        &self,
        key_hash: &str,
        key_prefix: &str,
        created_at: DateTime<Utc>,
    ) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO api_keys (key_hash, key_prefix, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(key_hash)
        .bind(key_prefix)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store API key: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Whether a digest is present
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn api_key_hash_exists(&self, key_hash: &str) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM api_keys WHERE key_hash = $1")
            .bind(key_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up API key: {e}")))?;
        Ok(row.is_some())
    }

    /// All digests in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_api_key_hashes(&self) -> AppResult<Vec<String>> {
        let rows = sqlx::query("SELECT key_hash FROM api_keys ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load API keys: {e}")))?;

        rows.iter()
            .map(|row| {
                row.try_get("key_hash")
                    .map_err(|e| AppError::database(format!("Malformed key_hash column: {e}")))
            })
            .collect()
    }

    /// All key records in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_api_keys(&self) -> AppResult<Vec<ApiKeyRecord>> {
        let rows = sqlx::query(
            "SELECT id, key_hash, key_prefix, created_at FROM api_keys ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list API keys: {e}")))?;

        rows.iter().map(Self::row_to_api_key_record).collect()
    }

    /// Number of stored keys
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn count_api_keys(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM api_keys")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count API keys: {e}")))?;
        Ok(count.unsigned_abs())
    }

    fn row_to_api_key_record(row: &SqliteRow) -> AppResult<ApiKeyRecord> {
        let column_error = |e: SqlxError| AppError::database(format!("Malformed api_keys row: {e}"));
        Ok(ApiKeyRecord {
            id: row.try_get("id").map_err(column_error)?,
            key_hash: row.try_get("key_hash").map_err(column_error)?,
            key_prefix: row.try_get("key_prefix").map_err(column_error)?,
            created_at: row.try_get("created_at").map_err(column_error)?,
        })
    }
}
