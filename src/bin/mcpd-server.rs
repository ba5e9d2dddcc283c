// ABOUTME: mcpd server binary: loads configuration, opens the key store and serves HTTP
// ABOUTME: Generates and logs an initial API key when the store is empty
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # mcpd Server Binary
//!
//! Starts the API-key gated MCP tool gateway.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use mcpd::api_keys::ApiKeyManager;
use mcpd::config::{DatabaseUrl, ServerConfig};
use mcpd::key_store::KeyStore;
use mcpd::logging::{self, LoggingConfig};
use mcpd::mcp::{McpServer, ServerResources};
use mcpd::tools::ToolRegistry;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "mcpd-server")]
#[command(about = "mcpd - API-key gated MCP tool gateway", version)]
pub struct Args {
    /// Override the bind address
    #[arg(long)]
    host: Option<String>,

    /// Override the HTTP port
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// Override the key store database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Override the log level
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.log_level.as_deref() {
        Some(level) => LoggingConfig::from_env().with_level(level).init()?,
        None => logging::init_from_env()?,
    }

    let mut config = ServerConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database_url = DatabaseUrl::parse_url(url)?;
    }
    config.validate()?;

    info!("Starting mcpd");
    info!("{}", config.summary());

    let key_store = KeyStore::open(
        &config.database_url,
        ApiKeyManager::new(config.auth.api_key_bytes),
    )
    .await
    .context("Failed to open the API key store")?;
    key_store.bootstrap().await?;

    let registry = ToolRegistry::with_builtin_tools(&config)?;
    let resources = ServerResources::new(config, Arc::new(key_store), registry);
    let server = McpServer::new(Arc::new(resources));

    if let Err(e) = server.run().await {
        error!("Server error: {e}");
        return Err(e.into());
    }
    Ok(())
}
