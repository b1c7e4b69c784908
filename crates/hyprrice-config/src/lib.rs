//! Configuration model and snapshot codec for HyprRice
//!
//! Provides the typed configuration the GUI edits, plus the versioned
//! snapshot format the history and backup subsystems persist. The
//! [`Snapshotable`] trait is the seam those subsystems consume; they
//! never reach into section internals.

pub mod config;
pub mod error;
pub mod sections;
pub mod snapshot;

// Re-export public API
pub use config::{expand_tilde, RiceConfig};
pub use error::ConfigError;
pub use sections::{
    ClipboardConfig, GeneralConfig, GuiConfig, HyprlandConfig, LockscreenConfig,
    NotificationConfig, PathsConfig, RofiConfig, WaybarConfig,
};
pub use snapshot::{
    ConfigSnapshot, SectionSnapshot, SettingValue, Snapshotable, SNAPSHOT_FORMAT_VERSION,
};
