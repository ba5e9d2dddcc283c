// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses MCPD_* variables into a typed, validated ServerConfig
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration management

use std::env;
use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{env_config, key_format};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational (default)
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" | "critical" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe key store location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string. Bare paths are treated as `SQLite` files.
    ///
    /// # Errors
    ///
    /// Returns an error for URL schemes other than `sqlite:`
    pub fn parse_url(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(rest) = trimmed.strip_prefix("sqlite:") {
            let path_str = rest.trim_start_matches("//");
            if path_str == ":memory:" || path_str.is_empty() {
                return Ok(Self::Memory);
            }
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            return Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            });
        }
        if trimmed.contains("://") {
            bail!("Unsupported database URL '{trimmed}': only sqlite: URLs are supported");
        }
        Ok(Self::SQLite {
            path: PathBuf::from(trimmed),
        })
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/api_keys.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Random bytes drawn per generated key
    pub api_key_bytes: usize,
    /// Exact request paths served without a credential
    pub exempt_paths: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key_bytes: key_format::MIN_KEY_BYTES,
            exempt_paths: env_config::DEFAULT_EXEMPT_PATHS
                .iter()
                .map(|p| (*p).to_owned())
                .collect(),
        }
    }
}

/// Process execution limits for the console tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Timeout applied when the caller supplies none
    pub default_timeout: Duration,
    /// Largest timeout a caller may request
    pub max_timeout: Duration,
    /// Time between SIGTERM and SIGKILL
    pub kill_grace: Duration,
    /// Per-stream capture cap in bytes
    pub max_output_bytes: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs_f64(env_config::DEFAULT_COMMAND_TIMEOUT_SECS),
            max_timeout: Duration::from_secs_f64(env_config::DEFAULT_MAX_COMMAND_TIMEOUT_SECS),
            kill_grace: Duration::from_millis(env_config::DEFAULT_KILL_GRACE_MS),
            max_output_bytes: env_config::DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

/// Outbound HTTP tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpToolConfig {
    /// Whole-request timeout
    pub request_timeout: Duration,
}

impl Default for HttpToolConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(env_config::DEFAULT_HTTP_TOOL_TIMEOUT_SECS),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Key store location
    pub database_url: DatabaseUrl,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Console tool limits
    pub console: ConsoleConfig,
    /// jsonapi tool settings
    pub http_tool: HttpToolConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: env_config::DEFAULT_HOST.to_owned(),
            http_port: env_config::DEFAULT_PORT,
            log_level: LogLevel::default(),
            environment: Environment::default(),
            database_url: DatabaseUrl::default(),
            auth: AuthConfig::default(),
            console: ConsoleConfig::default(),
            http_tool: HttpToolConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value or the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            host: env_var_or(env_config::HOST, env_config::DEFAULT_HOST),
            http_port: parse_env(env_config::PORT, env_config::DEFAULT_PORT)?,
            log_level: LogLevel::from_str_or_default(&env_var_or(env_config::LOG_LEVEL, "info")),
            environment: Environment::from_str_or_default(&env_var_or(
                env_config::ENVIRONMENT,
                "development",
            )),
            database_url: DatabaseUrl::parse_url(&env_var_or(
                env_config::DATABASE_URL,
                env_config::DEFAULT_DATABASE_URL,
            ))
            .context("Invalid MCPD_DATABASE_URL value")?,
            auth: AuthConfig {
                api_key_bytes: parse_env(env_config::API_KEY_LENGTH, key_format::MIN_KEY_BYTES)?,
                exempt_paths: env::var(env_config::EXEMPT_PATHS).map_or_else(
                    |_| AuthConfig::default().exempt_paths,
                    |v| parse_paths(&v),
                ),
            },
            console: ConsoleConfig {
                default_timeout: parse_secs(
                    env_config::DEFAULT_TIMEOUT_SECS,
                    env_config::DEFAULT_COMMAND_TIMEOUT_SECS,
                )?,
                max_timeout: parse_secs(
                    env_config::MAX_TIMEOUT_SECS,
                    env_config::DEFAULT_MAX_COMMAND_TIMEOUT_SECS,
                )?,
                kill_grace: Duration::from_millis(parse_env(
                    env_config::KILL_GRACE_MS,
                    env_config::DEFAULT_KILL_GRACE_MS,
                )?),
                max_output_bytes: parse_env(
                    env_config::MAX_OUTPUT_BYTES,
                    env_config::DEFAULT_MAX_OUTPUT_BYTES,
                )?,
            },
            http_tool: HttpToolConfig {
                request_timeout: Duration::from_secs(parse_env(
                    env_config::HTTP_TOOL_TIMEOUT_SECS,
                    env_config::DEFAULT_HTTP_TOOL_TIMEOUT_SECS,
                )?),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violated constraint
    pub fn validate(&self) -> Result<()> {
        if self.auth.api_key_bytes < key_format::MIN_KEY_BYTES {
            bail!(
                "MCPD_API_KEY_LENGTH must be at least {} bytes, got {}",
                key_format::MIN_KEY_BYTES,
                self.auth.api_key_bytes
            );
        }
        if self.console.default_timeout.is_zero() || self.console.max_timeout.is_zero() {
            bail!("Command timeouts must be positive");
        }
        if self.console.max_timeout.as_secs_f64() > env_config::MAX_COMMAND_TIMEOUT_CEILING_SECS {
            bail!(
                "MCPD_MAX_TIMEOUT_SECS ({:?}) exceeds the ceiling of {}s",
                self.console.max_timeout,
                env_config::MAX_COMMAND_TIMEOUT_CEILING_SECS
            );
        }
        if self.console.default_timeout > self.console.max_timeout {
            bail!(
                "MCPD_DEFAULT_TIMEOUT_SECS ({:?}) exceeds MCPD_MAX_TIMEOUT_SECS ({:?})",
                self.console.default_timeout,
                self.console.max_timeout
            );
        }
        if self.console.max_output_bytes == 0 {
            bail!("MCPD_MAX_OUTPUT_BYTES must be positive");
        }
        if let Some(bad) = self.auth.exempt_paths.iter().find(|p| !p.starts_with('/')) {
            bail!("Exempt path '{bad}' must start with '/'");
        }
        Ok(())
    }

    /// Socket address string the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Log-safe configuration summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "mcpd Configuration:\n\
             - Bind: {}\n\
             - Log Level: {}\n\
             - Environment: {}\n\
             - Key Store: {}\n\
             - Key Length: {} bytes\n\
             - Exempt Paths: {}\n\
             - Command Timeout: default {:?}, max {:?}\n\
             - Kill Grace: {:?}\n\
             - Output Cap: {} bytes per stream",
            self.bind_address(),
            self.log_level,
            self.environment,
            self.database_url,
            self.auth.api_key_bytes,
            self.auth.exempt_paths.join(", "),
            self.console.default_timeout,
            self.console.max_timeout,
            self.console.kill_grace,
            self.console.max_output_bytes,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, using `default` when unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Parse a positive, finite number of seconds
fn parse_secs(key: &str, default: f64) -> Result<Duration> {
    let secs: f64 = parse_env(key, default)?;
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|d| !d.is_zero())
        .with_context(|| format!("Invalid {key} value '{secs}': expected positive seconds"))
}

/// Parse comma-separated exact paths
fn parse_paths(paths: &str) -> Vec<String> {
    paths
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").unwrap(),
            DatabaseUrl::Memory
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/keys.db?mode=rwc").unwrap(),
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/keys.db")
            }
        );
        assert!(DatabaseUrl::parse_url("postgres://localhost/db").is_err());
    }

    #[test]
    fn test_parse_paths_trims_and_drops_empty() {
        assert_eq!(parse_paths(" /health, ,/ready "), vec!["/health", "/ready"]);
    }

    #[test]
    fn test_validate_caps_max_timeout() {
        let mut config = ServerConfig::default();
        config.console.max_timeout = Duration::from_secs(u64::MAX);
        assert!(config.validate().is_err());

        config.console.max_timeout = Duration::from_secs(604_800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_keys() {
        let mut config = ServerConfig::default();
        config.auth.api_key_bytes = 16;
        assert!(config.validate().is_err());
    }
}
