// ABOUTME: mcpd CLI - operator tool for the API key store
// ABOUTME: Initializes the database and mints, lists and counts API keys offline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Create the key store (and its directory) if missing
//! mcpd-cli init-db
//!
//! # Mint a key without going through the HTTP endpoint
//! mcpd-cli generate-key
//!
//! # Show key prefixes and creation times
//! mcpd-cli list-keys
//!
//! # Print how many keys exist
//! mcpd-cli count-keys --database-url sqlite:./data/api_keys.db
//! ```
//!
//! A running server picks up keys minted here on first use, without a restart.

mod commands;
mod helpers;

use std::io;

use clap::{Parser, Subcommand};
use mcpd::api_keys::ApiKeyManager;
use mcpd::config::{DatabaseUrl, ServerConfig};
use mcpd::errors::{AppError, AppResult};
use mcpd::key_store::KeyStore;
use tracing::info;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "mcpd-cli",
    about = "mcpd key store management CLI",
    long_about = "Command-line tool for creating the mcpd key store and managing API keys offline.",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override (defaults to `MCPD_DATABASE_URL`)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Create the key store database and run migrations
    InitDb,

    /// Mint and persist a new API key, printing it once
    GenerateKey,

    /// List key prefixes and creation times
    ListKeys {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the number of stored keys
    CountKeys,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .init();

    let mut config =
        ServerConfig::from_env().map_err(|e| AppError::config(format!("{e:#}")))?;
    if let Some(url) = cli.database_url.as_deref() {
        config.database_url =
            DatabaseUrl::parse_url(url).map_err(|e| AppError::config(format!("{e:#}")))?;
    }

    info!("Opening key store: {}", config.database_url);
    let store = KeyStore::open(
        &config.database_url,
        ApiKeyManager::new(config.auth.api_key_bytes),
    )
    .await?;

    match cli.command {
        Command::InitDb => commands::keys::init_db(&store, &config.database_url).await?,
        Command::GenerateKey => commands::keys::generate(&store).await?,
        Command::ListKeys { json } => commands::keys::list(&store, json).await?,
        Command::CountKeys => commands::keys::count(&store).await?,
    }

    Ok(())
}
