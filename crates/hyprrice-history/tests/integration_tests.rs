//! Integration tests for end-to-end history and backup workflows

use std::collections::BTreeMap;
use std::sync::Arc;

use tempfile::tempdir;

use hyprrice_config::{RiceConfig, Snapshotable};
use hyprrice_history::{
    shared_config, BackupManager, CommandManager, ConfigChangeCommand, HistoryManager,
};

fn snapshot_with_opacity(opacity: f64) -> hyprrice_config::ConfigSnapshot {
    let mut config = RiceConfig::default();
    config.hyprland.window_opacity = opacity;
    config.to_snapshot().unwrap()
}

/// Full workflow: execute commands, rewind, branch, and check the
/// live configuration at every step.
#[test]
fn test_execute_undo_branch_workflow() {
    let config = shared_config(RiceConfig::default());
    let mut manager = CommandManager::new(Arc::clone(&config), HistoryManager::new(10));

    for (i, opacity) in [0.95, 0.9, 0.85].iter().enumerate() {
        let mut command = ConfigChangeCommand::new(
            Arc::clone(&config),
            snapshot_with_opacity(*opacity),
            format!("Set opacity step {i}"),
        );
        assert!(manager.execute_command(&mut command));
    }
    assert_eq!(config.lock().unwrap().hyprland.window_opacity, 0.85);

    // Rewind one step, then record a new change; the redo branch dies.
    assert!(manager.undo_last_command());
    assert_eq!(config.lock().unwrap().hyprland.window_opacity, 0.9);
    assert!(manager.can_redo());

    let mut branch = ConfigChangeCommand::new(
        Arc::clone(&config),
        snapshot_with_opacity(0.5),
        "Dim everything",
    );
    assert!(manager.execute_command(&mut branch));
    assert!(!manager.can_redo());
    assert_eq!(config.lock().unwrap().hyprland.window_opacity, 0.5);

    let descriptions: Vec<_> = manager
        .history()
        .get_history()
        .into_iter()
        .map(|entry| entry.description)
        .collect();
    assert_eq!(
        descriptions,
        vec!["Set opacity step 0", "Set opacity step 1", "Dim everything"]
    );
}

/// Backups are independent of the undo stack: restoring one does not
/// disturb recorded history.
#[test]
fn test_backup_independent_of_history() {
    let dir = tempdir().unwrap();
    let config = shared_config(RiceConfig::default());
    let mut commands = CommandManager::new(Arc::clone(&config), HistoryManager::new(10));
    let mut backups = BackupManager::new(dir.path(), 5).unwrap();

    let mut command = ConfigChangeCommand::new(
        Arc::clone(&config),
        snapshot_with_opacity(0.8),
        "Set opacity",
    );
    assert!(commands.execute_command(&mut command));

    {
        let live = config.lock().unwrap();
        assert!(backups
            .create_backup("pre-experiment", "Known good state", &*live)
            .is_some());
    }

    let mut experiment = ConfigChangeCommand::new(
        Arc::clone(&config),
        snapshot_with_opacity(0.3),
        "Experiment",
    );
    assert!(commands.execute_command(&mut experiment));
    assert_eq!(config.lock().unwrap().hyprland.window_opacity, 0.3);

    {
        let mut live = config.lock().unwrap();
        assert!(backups.restore_backup("pre-experiment", &mut *live));
        assert_eq!(live.hyprland.window_opacity, 0.8);
    }

    // History still holds both recorded commands.
    assert_eq!(commands.history().entry_count(), 2);
    assert!(commands.can_undo());
}

/// History mirror and backup index both survive a process restart.
#[test]
fn test_persistence_across_sessions() {
    let root = tempdir().unwrap();
    let history_dir = root.path().join("history");
    let backup_dir = root.path().join("backups");

    // Session 1: record history and create a backup.
    {
        let config = shared_config(RiceConfig::default());
        let history = HistoryManager::with_dir(&history_dir, 10).unwrap();
        let mut commands = CommandManager::new(Arc::clone(&config), history);
        let mut backups = BackupManager::new(&backup_dir, 5).unwrap();

        for opacity in [0.9, 0.7] {
            let mut command = ConfigChangeCommand::new(
                Arc::clone(&config),
                snapshot_with_opacity(opacity),
                format!("Opacity {opacity}"),
            );
            assert!(commands.execute_command(&mut command));
        }
        let live = config.lock().unwrap();
        assert!(backups.create_backup("session-end", "", &*live).is_some());
    }

    // Session 2: both stores reload with their contents intact.
    {
        let history = HistoryManager::with_dir(&history_dir, 10).unwrap();
        assert_eq!(history.entry_count(), 2);
        assert_eq!(history.get_current_entry().unwrap().description, "Opacity 0.7");

        let backups = BackupManager::new(&backup_dir, 5).unwrap();
        assert_eq!(backups.list_backups().len(), 1);

        let mut live = RiceConfig::default();
        assert!(backups.restore_backup("session-end", &mut live));
        assert_eq!(live.hyprland.window_opacity, 0.7);
    }
}

/// Undo and redo entries carry metadata through to the history log.
#[test]
fn test_metadata_recorded_with_entries() {
    let config = shared_config(RiceConfig::default());
    let mut manager = CommandManager::new(Arc::clone(&config), HistoryManager::new(10));

    let mut metadata = BTreeMap::new();
    metadata.insert("source".to_string(), "theme-gallery".to_string());
    let mut command = ConfigChangeCommand::new(
        Arc::clone(&config),
        snapshot_with_opacity(0.6),
        "Apply gallery theme",
    )
    .with_metadata(metadata.clone());

    assert!(manager.execute_command(&mut command));
    let entry = manager.history().get_current_entry().unwrap();
    assert_eq!(entry.metadata, metadata);
}
