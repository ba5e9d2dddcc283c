// ABOUTME: SQLite connection management and schema migration for the key store
// ABOUTME: Opens or creates the database file and quarantines corrupt files
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Database Management
//!
//! Persistence for API key digests. The database is opened in WAL mode with
//! a busy timeout so that the server and the CLI can write concurrently.

mod api_keys;

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Error as SqlxError, Pool, Sqlite};
use tokio::fs;
use tracing::{error, info, warn};

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};

/// How long a writer waits on a lock held by another connection or process
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// `SQLite` result codes that mean the file is not a usable database
const CORRUPTION_CODES: &[&str] = &["11", "26"];

/// Database manager for API key storage
#[derive(Debug, Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if missing) the database at `url` and run migrations.
    ///
    /// A file that exists but is not a readable `SQLite` database is moved
    /// aside and replaced with an empty one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated after
    /// quarantining a corrupt file
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        match url {
            DatabaseUrl::Memory => Self::open_memory().await,
            DatabaseUrl::SQLite { path } => match Self::open_file(path).await {
                Ok(db) => Ok(db),
                Err(OpenError::Corrupt(reason)) => {
                    error!(
                        path = %path.display(),
                        "Key store is corrupt ({reason}), moving it aside and starting empty"
                    );
                    quarantine(path).await?;
                    Self::open_file(path).await.map_err(OpenError::into_app_error)
                }
                Err(other) => Err(other.into_app_error()),
            },
        }
    }

    async fn open_memory() -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::database(format!("Invalid in-memory database URL: {e}")))?;
        // A single long-lived connection keeps the in-memory database alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        let db = Self { pool };
        db.migrate()
            .await
            .map_err(|e| AppError::database(format!("Failed to migrate database: {e}")))?;
        Ok(db)
    }

    async fn open_file(path: &Path) -> Result<Self, OpenError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                OpenError::Other(AppError::storage(format!(
                    "Failed to create key store directory {}: {e}",
                    parent.display()
                )))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(OpenError::classify)?;

        let db = Self { pool };
        if let Err(e) = db.migrate().await {
            db.pool.close().await;
            return Err(OpenError::classify(e));
        }

        info!(path = %path.display(), "Key store database ready");
        Ok(db)
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns the underlying `sqlx` error if a statement fails
    pub async fn migrate(&self) -> Result<(), SqlxError> {
        self.migrate_api_keys().await
    }

    /// Cheap liveness probe used by the readiness endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot answer a trivial query
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

enum OpenError {
    Corrupt(String),
    Other(AppError),
}

impl OpenError {
    fn classify(error: SqlxError) -> Self {
        let corrupt_code = match &error {
            SqlxError::Database(db_error) => db_error
                .code()
                .is_some_and(|code| CORRUPTION_CODES.contains(&code.as_ref())),
            _ => false,
        };
        let message = error.to_string();
        if corrupt_code
            || message.contains("file is not a database")
            || message.contains("malformed")
        {
            Self::Corrupt(message)
        } else {
            Self::Other(AppError::database(format!("Failed to open key store: {message}")))
        }
    }

    fn into_app_error(self) -> AppError {
        match self {
            Self::Corrupt(reason) => {
                AppError::database(format!("Key store is still unreadable: {reason}"))
            }
            Self::Other(error) => error,
        }
    }
}

/// Move a corrupt database file (and its WAL companions) aside
async fn quarantine(path: &Path) -> AppResult<()> {
    let mut target = path.as_os_str().to_owned();
    target.push(format!(".corrupt-{}", Utc::now().timestamp()));
    let target = PathBuf::from(target);

    fs::rename(path, &target).await.map_err(|e| {
        AppError::storage(format!(
            "Failed to move corrupt key store {} aside: {e}",
            path.display()
        ))
    })?;
    warn!(from = %path.display(), to = %target.display(), "Corrupt key store quarantined");

    for suffix in ["-wal", "-shm"] {
        let mut companion = path.as_os_str().to_owned();
        companion.push(suffix);
        // Companions are optional
        let _ = fs::remove_file(PathBuf::from(companion)).await;
    }
    Ok(())
}
