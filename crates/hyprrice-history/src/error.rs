//! Error types for the history and backup subsystem

use hyprrice_config::ConfigError;
use thiserror::Error;

/// Errors that can occur in the history and backup subsystem
///
/// The manager APIs report failure through `bool`/`Option` returns;
/// this enum is the internal propagation channel and the constructor
/// fatal-error channel (backup directory cannot be created at startup).
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Snapshot could not be captured, encoded, decoded, or applied
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No backup is registered under the given name
    #[error("Backup not found: {0}")]
    BackupNotFound(String),

    /// A live backup already uses the given name
    #[error("Backup already exists: {0}")]
    DuplicateBackup(String),

    /// Index or mirror file serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HistoryError {
    /// Create a new BackupNotFound error with context
    pub fn backup_not_found(name: impl Into<String>) -> Self {
        Self::BackupNotFound(name.into())
    }

    /// Create a new DuplicateBackup error with context
    pub fn duplicate_backup(name: impl Into<String>) -> Self {
        Self::DuplicateBackup(name.into())
    }
}
