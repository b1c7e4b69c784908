//! Durable, named configuration backups with retention
//!
//! Each backup is a directory named `<timestamp>_<name>` holding the
//! serialized snapshot, so plain filename order is creation order. A
//! `backups.json` index carries the entry metadata across runs.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use hyprrice_config::{ConfigSnapshot, Snapshotable};

use crate::error::HistoryError;

const BACKUP_FILE_NAME: &str = "config.yaml";
const INDEX_FILE_NAME: &str = "backups.json";

/// A durable, user-named snapshot independent of the undo/redo stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupEntry {
    /// Unique name among live backups
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// When the backup was created
    pub created: DateTime<Utc>,
    /// Backup directory on disk
    pub path: PathBuf,
    /// Size of the serialized snapshot in bytes
    pub size: u64,
}

/// Bounded store of configuration backups in a single directory
///
/// The in-memory index always reflects what is on disk: a failed write
/// registers nothing, a failed delete keeps the entry.
pub struct BackupManager {
    backup_dir: PathBuf,
    max_backups: usize,
    backups: Vec<BackupEntry>,
}

impl BackupManager {
    /// Open a backup store, creating the directory and loading the index
    ///
    /// A corrupt index degrades to an empty store with a warning;
    /// entries whose artifact vanished are dropped. Only a directory
    /// that cannot be created is fatal.
    pub fn new(backup_dir: impl Into<PathBuf>, max_backups: usize) -> Result<Self, HistoryError> {
        let backup_dir = backup_dir.into();
        fs::create_dir_all(&backup_dir)?;

        let mut manager = BackupManager {
            backup_dir,
            max_backups: max_backups.max(1),
            backups: Vec::new(),
        };
        manager.backups = manager.load_index();
        debug!("Loaded {} backup entries", manager.backups.len());
        Ok(manager)
    }

    /// Persist the current configuration as a named backup
    ///
    /// Returns the backup path, or `None` on any failure. A failed
    /// write leaves no partial artifact and no index entry. Names must
    /// be unique among live backups; the oldest backups are evicted
    /// once the store exceeds its bound.
    pub fn create_backup(
        &mut self,
        name: &str,
        description: &str,
        config: &dyn Snapshotable,
    ) -> Option<PathBuf> {
        if self.backups.iter().any(|entry| entry.name == name) {
            warn!("{}", HistoryError::duplicate_backup(name));
            return None;
        }

        let text = match config.to_snapshot().and_then(|snapshot| {
            snapshot.to_yaml()
        }) {
            Ok(text) => text,
            Err(e) => {
                error!("Error creating backup {name}: {e}");
                return None;
            }
        };

        let created = Utc::now();
        let dir = match self.allocate_backup_dir(created, name) {
            Ok(dir) => dir,
            Err(e) => {
                error!("Error creating backup {name}: {e}");
                return None;
            }
        };
        if let Err(e) = write_atomic(&dir.join(BACKUP_FILE_NAME), &text) {
            error!("Error creating backup {name}: {e}");
            let _ = fs::remove_dir_all(&dir);
            return None;
        }

        self.backups.push(BackupEntry {
            name: name.to_string(),
            description: description.to_string(),
            created,
            path: dir.clone(),
            size: text.len() as u64,
        });
        if let Err(e) = self.save_index() {
            error!("Error creating backup {name}: {e}");
            self.backups.pop();
            let _ = fs::remove_dir_all(&dir);
            return None;
        }

        self.enforce_retention();
        info!("Backup created: {}", dir.display());
        Some(dir)
    }

    /// All live backups in creation order
    pub fn list_backups(&self) -> Vec<BackupEntry> {
        self.backups.clone()
    }

    /// Look up a backup by name
    pub fn get_backup_info(&self, name: &str) -> Option<BackupEntry> {
        self.backups.iter().find(|entry| entry.name == name).cloned()
    }

    /// Restore the named backup into the live configuration
    ///
    /// The snapshot is read and fully validated before any live state
    /// is mutated; an unknown name or corrupt artifact returns `false`
    /// and leaves the configuration untouched.
    pub fn restore_backup(&self, name: &str, config: &mut dyn Snapshotable) -> bool {
        let Some(entry) = self.backups.iter().find(|entry| entry.name == name) else {
            error!("{}", HistoryError::backup_not_found(name));
            return false;
        };

        let file = entry.path.join(BACKUP_FILE_NAME);
        let text = match fs::read_to_string(&file) {
            Ok(text) => text,
            Err(e) => {
                error!("Error restoring backup {name}: {e}");
                return false;
            }
        };
        let snapshot = match ConfigSnapshot::from_yaml(&text) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Error restoring backup {name}: {e}");
                return false;
            }
        };

        match config.apply_snapshot(&snapshot) {
            Ok(()) => {
                info!("Configuration restored from backup: {name}");
                true
            }
            Err(e) => {
                error!("Error restoring backup {name}: {e}");
                false
            }
        }
    }

    /// Delete the named backup and its on-disk artifact
    ///
    /// Returns `false` for unknown names. If the artifact cannot be
    /// removed the entry is kept, so the index never claims less than
    /// the disk holds.
    pub fn delete_backup(&mut self, name: &str) -> bool {
        let Some(position) = self.backups.iter().position(|entry| entry.name == name) else {
            warn!("{}", HistoryError::backup_not_found(name));
            return false;
        };

        let path = self.backups[position].path.clone();
        match fs::remove_dir_all(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                error!("Error deleting backup {name}: {e}");
                return false;
            }
        }

        self.backups.remove(position);
        if let Err(e) = self.save_index() {
            warn!("Failed to update backup index: {e}");
        }
        info!("Backup deleted: {name}");
        true
    }

    /// The directory backups are stored in
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Configured store bound
    pub fn max_backups(&self) -> usize {
        self.max_backups
    }

    fn allocate_backup_dir(
        &self,
        created: DateTime<Utc>,
        name: &str,
    ) -> Result<PathBuf, HistoryError> {
        let base = format!(
            "{}_{}",
            created.format("%Y-%m-%d_%H-%M-%S"),
            sanitize_name(name)
        );
        let mut candidate = self.backup_dir.join(&base);
        let mut attempt = 1u32;
        while candidate.exists() {
            attempt += 1;
            candidate = self.backup_dir.join(format!("{base}-{attempt}"));
        }
        fs::create_dir(&candidate)?;
        Ok(candidate)
    }

    // Retention is a pure function of max_backups: strictly the oldest
    // entries go first, ties broken by insertion order.
    fn enforce_retention(&mut self) {
        let mut evicted = false;
        while self.backups.len() > self.max_backups {
            let oldest = self.backups.remove(0);
            match fs::remove_dir_all(&oldest.path) {
                Ok(()) => info!("Evicted old backup: {}", oldest.name),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(
                    "Failed to remove evicted backup {}: {e}",
                    oldest.path.display()
                ),
            }
            evicted = true;
        }
        if evicted {
            if let Err(e) = self.save_index() {
                warn!("Failed to update backup index: {e}");
            }
        }
    }

    fn index_path(&self) -> PathBuf {
        self.backup_dir.join(INDEX_FILE_NAME)
    }

    fn save_index(&self) -> Result<(), HistoryError> {
        let text = serde_json::to_string_pretty(&self.backups)?;
        write_atomic(&self.index_path(), &text)
    }

    fn load_index(&self) -> Vec<BackupEntry> {
        let path = self.index_path();
        if !path.exists() {
            return Vec::new();
        }
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read backup index, starting empty: {e}");
                return Vec::new();
            }
        };
        let entries: Vec<BackupEntry> = match serde_json::from_str(&text) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Corrupt backup index, starting empty: {e}");
                return Vec::new();
            }
        };
        entries
            .into_iter()
            .filter(|entry| {
                let present = entry.path.exists();
                if !present {
                    warn!("Dropping backup entry {} with missing artifact", entry.name);
                }
                present
            })
            .collect()
    }
}

fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "backup".to_string()
    } else {
        cleaned
    }
}

fn write_atomic(path: &Path, text: &str) -> Result<(), HistoryError> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, text)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
