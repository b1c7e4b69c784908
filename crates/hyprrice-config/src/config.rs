//! The aggregate HyprRice configuration and its snapshot bridge

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::sections::{
    ClipboardConfig, GeneralConfig, GuiConfig, HyprlandConfig, LockscreenConfig,
    NotificationConfig, PathsConfig, RofiConfig, WaybarConfig,
};
use crate::snapshot::{ConfigSnapshot, SectionSnapshot, Snapshotable};

/// The complete HyprRice configuration
///
/// This is the live object the GUI mutates and the history/backup core
/// snapshots. Section structure is fixed; snapshots carry the same
/// sections as a schema'd map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiceConfig {
    pub general: GeneralConfig,
    pub paths: PathsConfig,
    pub gui: GuiConfig,
    pub hyprland: HyprlandConfig,
    pub waybar: WaybarConfig,
    pub rofi: RofiConfig,
    pub notifications: NotificationConfig,
    pub clipboard: ClipboardConfig,
    pub lockscreen: LockscreenConfig,
}

impl RiceConfig {
    /// Load a configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: RiceConfig = serde_yaml::from_str(&text)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load a configuration, falling back to defaults when the file does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "No configuration at {}, using defaults",
                path.display()
            );
            return Ok(RiceConfig::default());
        }
        Self::load(path)
    }

    /// Save the configuration as YAML, atomically (write to temp, then rename)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_yaml::to_string(self)?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &text)?;
        fs::rename(&temp_path, path)?;
        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Default configuration file location (`~/.config/hyprrice/config.yaml`)
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hyprrice")
            .join("config.yaml")
    }

    /// The backup directory configured under `paths.backup_dir`, tilde-expanded
    pub fn backup_dir(&self) -> PathBuf {
        expand_tilde(&self.paths.backup_dir)
    }
}

impl Snapshotable for RiceConfig {
    fn to_snapshot(&self) -> Result<ConfigSnapshot, ConfigError> {
        let mut sections = BTreeMap::new();
        sections.insert("general".to_string(), section_map(&self.general)?);
        sections.insert("paths".to_string(), section_map(&self.paths)?);
        sections.insert("gui".to_string(), section_map(&self.gui)?);
        sections.insert("hyprland".to_string(), section_map(&self.hyprland)?);
        sections.insert("waybar".to_string(), section_map(&self.waybar)?);
        sections.insert("rofi".to_string(), section_map(&self.rofi)?);
        sections.insert(
            "notifications".to_string(),
            section_map(&self.notifications)?,
        );
        sections.insert("clipboard".to_string(), section_map(&self.clipboard)?);
        sections.insert("lockscreen".to_string(), section_map(&self.lockscreen)?);
        Ok(ConfigSnapshot::new(sections))
    }

    fn apply_snapshot(&mut self, snapshot: &ConfigSnapshot) -> Result<(), ConfigError> {
        // Stage everything first so a bad section never half-applies.
        let mut staged = self.clone();
        for (name, settings) in &snapshot.sections {
            match name.as_str() {
                "general" => staged.general = section_from_map(settings)?,
                "paths" => staged.paths = section_from_map(settings)?,
                "gui" => staged.gui = section_from_map(settings)?,
                "hyprland" => staged.hyprland = section_from_map(settings)?,
                "waybar" => staged.waybar = section_from_map(settings)?,
                "rofi" => staged.rofi = section_from_map(settings)?,
                "notifications" => staged.notifications = section_from_map(settings)?,
                "clipboard" => staged.clipboard = section_from_map(settings)?,
                "lockscreen" => staged.lockscreen = section_from_map(settings)?,
                other => return Err(ConfigError::unknown_section(other)),
            }
        }
        *self = staged;
        Ok(())
    }
}

/// Expand a leading `~/` to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn section_map<T: Serialize>(section: &T) -> Result<SectionSnapshot, ConfigError> {
    let value = serde_yaml::to_value(section)?;
    Ok(serde_yaml::from_value(value)?)
}

fn section_from_map<T: DeserializeOwned>(settings: &SectionSnapshot) -> Result<T, ConfigError> {
    let value = serde_yaml::to_value(settings)?;
    Ok(serde_yaml::from_value(value)?)
}
