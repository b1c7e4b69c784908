//! Command pattern over configuration changes
//!
//! Every user action is a [`Command`]; executing one through the
//! [`CommandManager`] records a history entry, and undo/redo are
//! themselves commands so they show up in any persisted log with a
//! readable description.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::{debug, error};

use hyprrice_config::{ConfigSnapshot, RiceConfig, Snapshotable};

use crate::history::{HistoryEntry, HistoryManager};

/// Shared handle to the live configuration
///
/// The mutex is the external single-writer lock; the managers
/// themselves never hold it across calls.
pub type SharedConfig = Arc<Mutex<RiceConfig>>;

/// Wrap a configuration into a [`SharedConfig`] handle
pub fn shared_config(config: RiceConfig) -> SharedConfig {
    Arc::new(Mutex::new(config))
}

/// A unit of user-visible change to the configuration
pub trait Command {
    /// Apply the command to the live configuration
    fn execute(&mut self) -> bool;

    /// Short machine-oriented action tag
    fn action_name(&self) -> &str;

    /// Human-readable description, never empty
    fn description(&self) -> String;

    /// Handle to the configuration the command operates on
    fn config(&self) -> SharedConfig;

    /// Files the command touches, in order
    fn file_paths(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    /// Free-form string metadata recorded with the history entry
    fn metadata(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}

/// Replaces the live configuration state with a prepared snapshot
pub struct ConfigChangeCommand {
    config: SharedConfig,
    new_state: ConfigSnapshot,
    old_state: Option<ConfigSnapshot>,
    description: String,
    file_paths: Vec<PathBuf>,
    metadata: BTreeMap<String, String>,
}

impl ConfigChangeCommand {
    /// Create a command that applies `new_state` when executed
    pub fn new(
        config: SharedConfig,
        new_state: ConfigSnapshot,
        description: impl Into<String>,
    ) -> Self {
        ConfigChangeCommand {
            config,
            new_state,
            old_state: None,
            description: description.into(),
            file_paths: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach the files this change touches
    pub fn with_file_paths(mut self, file_paths: Vec<PathBuf>) -> Self {
        self.file_paths = file_paths;
        self
    }

    /// Attach metadata recorded with the history entry
    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    /// State captured just before the last successful execute
    pub fn old_state(&self) -> Option<&ConfigSnapshot> {
        self.old_state.as_ref()
    }
}

impl Command for ConfigChangeCommand {
    fn execute(&mut self) -> bool {
        let mut live = match self.config.lock() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Failed to lock configuration: {e}");
                return false;
            }
        };
        self.old_state = live.to_snapshot().ok();
        match live.apply_snapshot(&self.new_state) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to execute config change: {e}");
                false
            }
        }
    }

    fn action_name(&self) -> &str {
        "ConfigChange"
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn config(&self) -> SharedConfig {
        Arc::clone(&self.config)
    }

    fn file_paths(&self) -> Vec<PathBuf> {
        self.file_paths.clone()
    }

    fn metadata(&self) -> BTreeMap<String, String> {
        self.metadata.clone()
    }
}

/// Re-applies the snapshot of the entry an undo stepped back to
pub struct UndoCommand {
    config: SharedConfig,
    entry: HistoryEntry,
}

impl UndoCommand {
    /// Wrap the history entry the stack rewound to
    pub fn new(config: SharedConfig, entry: HistoryEntry) -> Self {
        UndoCommand { config, entry }
    }
}

impl Command for UndoCommand {
    fn execute(&mut self) -> bool {
        apply_entry(&self.config, &self.entry)
    }

    fn action_name(&self) -> &str {
        "Undo"
    }

    fn description(&self) -> String {
        format!("Undo: {} - {}", self.entry.action, self.entry.description)
    }

    fn config(&self) -> SharedConfig {
        Arc::clone(&self.config)
    }

    fn file_paths(&self) -> Vec<PathBuf> {
        self.entry.file_paths.clone()
    }
}

/// Re-applies the snapshot of the entry a redo stepped forward to
pub struct RedoCommand {
    config: SharedConfig,
    entry: HistoryEntry,
}

impl RedoCommand {
    /// Wrap the history entry the stack advanced to
    pub fn new(config: SharedConfig, entry: HistoryEntry) -> Self {
        RedoCommand { config, entry }
    }
}

impl Command for RedoCommand {
    fn execute(&mut self) -> bool {
        apply_entry(&self.config, &self.entry)
    }

    fn action_name(&self) -> &str {
        "Redo"
    }

    fn description(&self) -> String {
        format!("Redo: {} - {}", self.entry.action, self.entry.description)
    }

    fn config(&self) -> SharedConfig {
        Arc::clone(&self.config)
    }

    fn file_paths(&self) -> Vec<PathBuf> {
        self.entry.file_paths.clone()
    }
}

fn apply_entry(config: &SharedConfig, entry: &HistoryEntry) -> bool {
    let mut live = match config.lock() {
        Ok(guard) => guard,
        Err(e) => {
            error!("Failed to lock configuration: {e}");
            return false;
        }
    };
    match live.apply_snapshot(&entry.config_snapshot) {
        Ok(()) => true,
        Err(e) => {
            error!(
                "Failed to apply snapshot of {} - {}: {e}",
                entry.action, entry.description
            );
            false
        }
    }
}

/// Runs commands and turns them into history entries
pub struct CommandManager {
    history: HistoryManager,
    config: SharedConfig,
}

impl CommandManager {
    /// Create a manager recording into the given history
    pub fn new(config: SharedConfig, history: HistoryManager) -> Self {
        CommandManager { config, history }
    }

    /// Execute a command and record it on success
    ///
    /// A command that fails to execute is never recorded.
    pub fn execute_command(&mut self, command: &mut dyn Command) -> bool {
        if !command.execute() {
            error!("Command execution failed: {}", command.description());
            return false;
        }
        debug!("Command executed: {}", command.description());

        let config = command.config();
        let live = match config.lock() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Failed to lock configuration: {e}");
                return false;
            }
        };
        self.history.add_entry_full(
            command.action_name(),
            &command.description(),
            &*live,
            command.file_paths(),
            command.metadata(),
        )
    }

    /// Undo the last command, re-applying the previous snapshot
    ///
    /// Returns whether an entry was available to undo.
    pub fn undo_last_command(&mut self) -> bool {
        let Some(entry) = self.history.undo() else {
            return false;
        };
        let mut command = UndoCommand::new(Arc::clone(&self.config), entry);
        command.execute()
    }

    /// Redo the next command, re-applying its snapshot
    ///
    /// Returns whether an entry was available to redo.
    pub fn redo_last_command(&mut self) -> bool {
        let Some(entry) = self.history.redo() else {
            return false;
        };
        let mut command = RedoCommand::new(Arc::clone(&self.config), entry);
        command.execute()
    }

    /// Whether an undo step is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The recorded history, for display
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// The live configuration handle
    pub fn config(&self) -> SharedConfig {
        Arc::clone(&self.config)
    }
}
