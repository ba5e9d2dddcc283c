// ABOUTME: Key store commands for mcpd-cli
// ABOUTME: Handles init-db, generate-key, list-keys and count-keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mcpd::config::DatabaseUrl;
use mcpd::errors::{AppError, AppResult};
use mcpd::key_store::KeyStore;
use tracing::info;

use crate::helpers::display::{display_generated_key, display_key_table};

type Result<T> = AppResult<T>;

/// Opening the store already created and migrated it; report where it lives
pub async fn init_db(store: &KeyStore, url: &DatabaseUrl) -> Result<()> {
    store.ping().await?;
    let count = store.len().await?;
    info!("Key store initialized at {url}");
    println!("Key store ready: {url} ({count} key(s))");
    Ok(())
}

/// Mint and persist a new key
pub async fn generate(store: &KeyStore) -> Result<()> {
    let key = store.generate().await?;
    display_generated_key(&key);
    Ok(())
}

/// List key prefixes, oldest first
pub async fn list(store: &KeyStore, json: bool) -> Result<()> {
    let records = store.list().await?;
    if json {
        let rendered = serde_json::to_string_pretty(&records)
            .map_err(|e| AppError::serialization(format!("Failed to render key list: {e}")))?;
        println!("{rendered}");
    } else {
        display_key_table(&records);
    }
    Ok(())
}

/// Print the number of stored keys
pub async fn count(store: &KeyStore) -> Result<()> {
    println!("{}", store.len().await?);
    Ok(())
}
