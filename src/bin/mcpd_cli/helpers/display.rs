// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for mcpd-cli
// ABOUTME: Consistent display of generated keys and key listings

use mcpd::api_keys::ApiKey;
use mcpd_core::models::ApiKeyRecord;

/// Display a freshly minted key; it is never shown again
pub fn display_generated_key(key: &ApiKey) {
    println!("\nAPI key generated");
    println!("{}", "=".repeat(80));
    println!("{}", key.expose());
    println!("{}", "=".repeat(80));
    println!("This key is shown ONLY ONCE. Only its SHA-256 digest is stored.");
    println!("Send it as `X-API-Key: <key>` or `Authorization: Bearer <key>`.");
}

/// Display key records as a table
pub fn display_key_table(records: &[ApiKeyRecord]) {
    if records.is_empty() {
        println!("No API keys found. Run `mcpd-cli generate-key` to create one.");
        return;
    }

    println!("{:<6} {:<16} CREATED", "ID", "PREFIX");
    for record in records {
        println!(
            "{:<6} {:<16} {}",
            record.id,
            record.key_prefix,
            record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    println!("\n{} key(s)", records.len());
}
