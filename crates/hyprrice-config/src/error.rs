//! Error types for the configuration model and snapshot codec

use thiserror::Error;

/// Errors that can occur while encoding, decoding, or applying configuration state
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML encoding or decoding failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot was written by an unknown format version
    #[error("Unsupported snapshot version {found}, expected {expected}")]
    UnsupportedSnapshotVersion {
        /// Version found in the decoded document
        found: u32,
        /// Version this build understands
        expected: u32,
    },

    /// Snapshot references a section the configuration does not have
    #[error("Unknown configuration section: {0}")]
    UnknownSection(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Create a new UnknownSection error with context
    pub fn unknown_section(name: impl Into<String>) -> Self {
        Self::UnknownSection(name.into())
    }
}
