#![warn(missing_docs)]

//! History and backup management for HyprRice
//!
//! Provides undo/redo over full configuration snapshots, durable named
//! backups with retention, and the command layer that ties user
//! actions to recorded history.

pub mod backup;
pub mod command;
pub mod error;
pub mod history;

// Re-export public API
pub use backup::{BackupEntry, BackupManager};
pub use command::{
    shared_config, Command, CommandManager, ConfigChangeCommand, RedoCommand, SharedConfig,
    UndoCommand,
};
pub use error::HistoryError;
pub use history::{HistoryEntry, HistoryManager};
