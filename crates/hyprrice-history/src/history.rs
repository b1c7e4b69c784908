//! Undo/redo history over full configuration snapshots
//!
//! The stack is in-memory with an optional on-disk mirror: one JSON
//! file per entry, named by a sortable timestamp so a later process
//! can reload the surviving entries in order.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use hyprrice_config::{ConfigSnapshot, Snapshotable};

use crate::error::HistoryError;

/// One recorded action plus the snapshot taken after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the action was recorded
    pub timestamp: DateTime<Utc>,
    /// Short machine-oriented action tag
    pub action: String,
    /// Human-readable description of the action
    pub description: String,
    /// Full configuration state after the action
    pub config_snapshot: ConfigSnapshot,
    /// Files the action touched, in order
    pub file_paths: Vec<PathBuf>,
    /// Free-form string metadata
    pub metadata: BTreeMap<String, String>,
}

impl HistoryEntry {
    /// Create a new entry stamped with the current time
    pub fn new(
        action: impl Into<String>,
        description: impl Into<String>,
        config_snapshot: ConfigSnapshot,
        file_paths: Vec<PathBuf>,
        metadata: BTreeMap<String, String>,
    ) -> Self {
        HistoryEntry {
            timestamp: Utc::now(),
            action: action.into(),
            description: description.into(),
            config_snapshot,
            file_paths,
            metadata,
        }
    }
}

/// Bounded undo/redo stack of configuration snapshots
///
/// Entries before the cursor are undoable, entries after it are
/// redoable. Recording a new entry while rewound discards the
/// redoable tail (branch discard). The stack is bounded to
/// `max_entries`, evicting oldest-first.
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    current: Option<usize>,
    max_entries: usize,
    history_dir: Option<PathBuf>,
}

impl HistoryManager {
    /// Create an in-memory history bounded to `max_entries`
    pub fn new(max_entries: usize) -> Self {
        HistoryManager {
            entries: Vec::new(),
            current: None,
            max_entries: max_entries.max(1),
            history_dir: None,
        }
    }

    /// Create a disk-mirrored history, reloading entries left by a previous run
    ///
    /// Corrupt mirror files are skipped with a warning; only a
    /// directory that cannot be created or scanned is fatal.
    pub fn with_dir(
        history_dir: impl Into<PathBuf>,
        max_entries: usize,
    ) -> Result<Self, HistoryError> {
        let history_dir = history_dir.into();
        fs::create_dir_all(&history_dir)?;

        let mut manager = HistoryManager {
            entries: load_entries(&history_dir)?,
            current: None,
            max_entries: max_entries.max(1),
            history_dir: Some(history_dir),
        };
        while manager.entries.len() > manager.max_entries {
            let evicted = manager.entries.remove(0);
            manager.remove_entry_file(&evicted);
        }
        manager.current = manager.entries.len().checked_sub(1);
        debug!("Loaded {} history entries", manager.entries.len());
        Ok(manager)
    }

    /// Record a new entry from the current configuration state
    ///
    /// Returns `false` on snapshot or mirror-write failure, in which
    /// case the stack is left exactly as it was.
    pub fn add_entry(
        &mut self,
        action: &str,
        description: &str,
        config: &dyn Snapshotable,
    ) -> bool {
        self.add_entry_full(action, description, config, Vec::new(), BTreeMap::new())
    }

    /// Record a new entry carrying touched file paths and metadata
    pub fn add_entry_full(
        &mut self,
        action: &str,
        description: &str,
        config: &dyn Snapshotable,
        file_paths: Vec<PathBuf>,
        metadata: BTreeMap<String, String>,
    ) -> bool {
        let snapshot = match config.to_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Error adding history entry: {e}");
                return false;
            }
        };
        let entry = HistoryEntry::new(action, description, snapshot, file_paths, metadata);

        // Mirror before touching the stack so a write failure has no
        // partial effect.
        if let Some(dir) = &self.history_dir {
            if let Err(e) = persist_entry(dir, &entry) {
                error!("Error saving history entry: {e}");
                return false;
            }
        }

        // Branch discard: a new action invalidates everything redoable.
        let keep = self.current.map_or(0, |index| index + 1);
        if keep < self.entries.len() {
            for stale in self.entries.split_off(keep) {
                self.remove_entry_file(&stale);
            }
        }

        self.entries.push(entry);
        self.current = Some(self.entries.len() - 1);

        while self.entries.len() > self.max_entries {
            let evicted = self.entries.remove(0);
            self.remove_entry_file(&evicted);
            self.current = self.current.map(|index| index.saturating_sub(1));
        }

        debug!("Added history entry: {action} - {description}");
        true
    }

    /// Whether an undo step is available
    pub fn can_undo(&self) -> bool {
        matches!(self.current, Some(index) if index > 0)
    }

    /// Whether a redo step is available
    pub fn can_redo(&self) -> bool {
        matches!(self.current, Some(index) if index + 1 < self.entries.len())
    }

    /// Step the cursor back and return the entry now current
    ///
    /// Returns `None` without changing state when nothing can be
    /// undone.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        match self.current {
            Some(index) if index > 0 => {
                self.current = Some(index - 1);
                let entry = self.entries[index - 1].clone();
                info!("Undoing to: {} - {}", entry.action, entry.description);
                Some(entry)
            }
            _ => {
                debug!("Nothing to undo");
                None
            }
        }
    }

    /// Step the cursor forward and return the entry now current
    ///
    /// Returns `None` without changing state when nothing can be
    /// redone.
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        match self.current {
            Some(index) if index + 1 < self.entries.len() => {
                self.current = Some(index + 1);
                let entry = self.entries[index + 1].clone();
                info!("Redoing: {} - {}", entry.action, entry.description);
                Some(entry)
            }
            _ => {
                debug!("Nothing to redo");
                None
            }
        }
    }

    /// The entry the cursor points at, if any
    pub fn get_current_entry(&self) -> Option<HistoryEntry> {
        self.entries.get(self.current?).cloned()
    }

    /// The full stack, oldest first (presence does not imply redo-ability)
    pub fn get_history(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    /// Position of the cursor into [`get_history`](Self::get_history)
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Number of entries currently on the stack
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Configured stack bound
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Empty the stack and remove all mirror files
    pub fn clear_history(&mut self) -> bool {
        self.entries.clear();
        self.current = None;

        let mut ok = true;
        if let Some(dir) = self.history_dir.clone() {
            for entry in &entry_files(&dir) {
                if let Err(e) = fs::remove_file(entry) {
                    error!("Error clearing history file {}: {e}", entry.display());
                    ok = false;
                }
            }
        }
        if ok {
            info!("History cleared");
        }
        ok
    }

    fn remove_entry_file(&self, entry: &HistoryEntry) {
        let Some(dir) = &self.history_dir else {
            return;
        };
        let path = dir.join(entry_file_name(entry));
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove history file {}: {e}", path.display());
            }
        }
    }
}

fn entry_file_name(entry: &HistoryEntry) -> String {
    // Fixed-width fractional seconds keep filename order chronological.
    format!("{}.json", entry.timestamp.format("%Y-%m-%dT%H-%M-%S-%9f"))
}

fn persist_entry(dir: &Path, entry: &HistoryEntry) -> Result<(), HistoryError> {
    let path = dir.join(entry_file_name(entry));
    let text = serde_json::to_string_pretty(entry)?;
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, text)?;
    fs::rename(&temp_path, &path)?;
    Ok(())
}

fn entry_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

fn load_entries(dir: &Path) -> Result<Vec<HistoryEntry>, HistoryError> {
    let mut entries = Vec::new();
    for path in entry_files(dir) {
        let text = fs::read_to_string(&path)?;
        match serde_json::from_str::<HistoryEntry>(&text) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!("Skipping corrupt history file {}: {e}", path.display()),
        }
    }
    Ok(entries)
}
