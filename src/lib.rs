/// Public library interface for the weight tracker
///
/// This module exports the store implementations, the statistics and chart
/// pipelines and the command handlers the binary is built from, so they can
/// also be driven directly from tests or other applications.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod analytics;
pub mod chart;
pub mod commands;
pub mod config;
pub mod display;
pub mod domain;
pub mod storage;

// Re-export public modules and types
pub use analytics::WeightStatistics;
pub use chart::{ChartArtifact, ChartError, ChartOptions, ChartOutput};
pub use config::{AppConfig, ConfigError, DateFormat, FormatError, Session};
pub use domain::*;
pub use storage::{MemoryStore, SqliteStore, StorageError, UserStore, WeightStore};

/// Errors that can surface from any command
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Format(#[from] FormatError),

    #[error("{0}")]
    Chart(#[from] ChartError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no fields to update. Use --weight, --date, --unit, or --note flags")]
    NothingToUpdate,
}

/// A store paired with the settings and user every command runs with
pub struct WeightTracker<S> {
    store: S,
    config: AppConfig,
    session_path: PathBuf,
    current_user: Option<User>,
}

impl WeightTracker<SqliteStore> {
    /// Open the configured SQLite database and restore the logged-in user
    ///
    /// `database` overrides the configured path. Missing parent directories
    /// are created.
    pub fn open(config: AppConfig, database: Option<PathBuf>) -> Result<Self, AppError> {
        let db_path = match database.or_else(|| config.database_path.clone()) {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                path
            }
            None => config::default_database_path()?,
        };

        tracing::info!("Using database at: {}", db_path.display());
        let store = SqliteStore::new(&db_path)?;
        let session_path = config.resolve_session_path()?;

        Self::with_store(store, config, session_path)
    }
}

impl<S: WeightStore + UserStore> WeightTracker<S> {
    /// Wrap an existing store, restoring the user named in the session file
    pub fn with_store(store: S, config: AppConfig, session_path: PathBuf) -> Result<Self, AppError> {
        let current_user = commands::current_user(&store, &session_path)?;
        if let Some(user) = &current_user {
            tracing::debug!("Current user: {}", user.username);
        }

        Ok(Self {
            store,
            config,
            session_path,
            current_user,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Owner stamped on new entries and used to scope listings
    pub fn owner(&self) -> Option<UserId> {
        self.current_user.as_ref().map(|u| u.id)
    }

    /// Close the underlying store
    pub fn close(self) -> Result<(), AppError> {
        self.store.close()?;
        Ok(())
    }
}
