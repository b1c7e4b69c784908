//! Typed configuration sections
//!
//! One struct per rice-able component. Defaults mirror a stock Hyprland
//! desktop. All sections deserialize leniently: missing keys fall back
//! to their defaults so older config files keep loading.

use serde::{Deserialize, Serialize};

/// General application behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub auto_backup: bool,
    pub backup_retention: usize,
    pub live_preview: bool,
    pub theme: String,
    pub language: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            auto_backup: true,
            backup_retention: 10,
            live_preview: true,
            theme: "auto".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Locations of the managed config files and HyprRice's own state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub hyprland_config: String,
    pub waybar_config: String,
    pub rofi_config: String,
    pub dunst_config: String,
    pub mako_config: String,
    pub backup_dir: String,
    pub log_dir: String,
    pub theme_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            hyprland_config: "~/.config/hypr/hyprland.conf".to_string(),
            waybar_config: "~/.config/waybar/".to_string(),
            rofi_config: "~/.config/rofi/".to_string(),
            dunst_config: "~/.config/dunst/".to_string(),
            mako_config: "~/.config/mako/".to_string(),
            backup_dir: "~/.hyprrice/backups/".to_string(),
            log_dir: "~/.hyprrice/logs/".to_string(),
            theme_dir: "~/.hyprrice/themes/".to_string(),
        }
    }
}

/// Window and behavior settings of the HyprRice GUI itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub theme: String,
    pub window_width: u32,
    pub window_height: u32,
    pub show_tooltips: bool,
    pub show_status_bar: bool,
    pub auto_save: bool,
    /// Auto-save interval in seconds
    pub auto_save_interval: u32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        GuiConfig {
            theme: "dark".to_string(),
            window_width: 1200,
            window_height: 800,
            show_tooltips: true,
            show_status_bar: true,
            auto_save: true,
            auto_save_interval: 30,
        }
    }
}

/// Hyprland compositor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyprlandConfig {
    pub animations_enabled: bool,
    pub animation_duration: f64,
    pub animation_curve: String,
    pub window_opacity: f64,
    pub border_size: i64,
    pub border_color: String,
    pub gaps_in: i64,
    pub gaps_out: i64,
    pub smart_gaps: bool,
    pub smart_borders: bool,
    pub blur_enabled: bool,
    pub blur_size: i64,
    pub blur_passes: i64,
}

impl Default for HyprlandConfig {
    fn default() -> Self {
        HyprlandConfig {
            animations_enabled: true,
            animation_duration: 0.5,
            animation_curve: "ease-out".to_string(),
            window_opacity: 1.0,
            border_size: 1,
            border_color: "#ffffff".to_string(),
            gaps_in: 5,
            gaps_out: 10,
            smart_gaps: true,
            smart_borders: true,
            blur_enabled: true,
            blur_size: 8,
            blur_passes: 1,
        }
    }
}

/// Waybar status bar settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaybarConfig {
    pub position: String,
    pub height: u32,
    pub background_color: String,
    pub border_color: String,
    pub text_color: String,
    pub font_family: String,
    pub font_size: u32,
    pub modules: Vec<String>,
}

impl Default for WaybarConfig {
    fn default() -> Self {
        WaybarConfig {
            position: "top".to_string(),
            height: 30,
            background_color: "rgba(43, 48, 59, 0.5)".to_string(),
            border_color: "rgba(100, 115, 245, 0.5)".to_string(),
            text_color: "#ffffff".to_string(),
            font_family: "JetBrainsMono Nerd Font".to_string(),
            font_size: 13,
            modules: vec![
                "clock".to_string(),
                "battery".to_string(),
                "network".to_string(),
                "cpu".to_string(),
                "memory".to_string(),
                "tray".to_string(),
            ],
        }
    }
}

/// Rofi launcher settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RofiConfig {
    pub theme: String,
    pub width: u32,
    pub location: String,
    pub anchor: String,
    pub background_color: String,
    pub text_color: String,
    pub border_color: String,
    pub font_family: String,
    pub font_size: u32,
}

impl Default for RofiConfig {
    fn default() -> Self {
        RofiConfig {
            theme: "default".to_string(),
            width: 40,
            location: "center".to_string(),
            anchor: "center".to_string(),
            background_color: "#2e3440".to_string(),
            text_color: "#eceff4".to_string(),
            border_color: "#5e81ac".to_string(),
            font_family: "JetBrainsMono Nerd Font".to_string(),
            font_size: 14,
        }
    }
}

/// Notification daemon settings (dunst or mako)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub daemon: String,
    pub position: String,
    /// Notification timeout in milliseconds
    pub timeout: u32,
    pub background_color: String,
    pub text_color: String,
    pub border_color: String,
    pub font_family: String,
    pub font_size: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        NotificationConfig {
            daemon: "dunst".to_string(),
            position: "top-right".to_string(),
            timeout: 5000,
            background_color: "#2e3440".to_string(),
            text_color: "#eceff4".to_string(),
            border_color: "#5e81ac".to_string(),
            font_family: "JetBrainsMono Nerd Font".to_string(),
            font_size: 12,
        }
    }
}

/// Clipboard manager settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    pub manager: String,
    pub history_size: u32,
    /// Largest stored item in KiB
    pub max_item_size: u32,
    pub enable_images: bool,
    pub enable_primary_selection: bool,
    pub persist_history: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        ClipboardConfig {
            manager: "cliphist".to_string(),
            history_size: 100,
            max_item_size: 1024,
            enable_images: true,
            enable_primary_selection: true,
            persist_history: true,
        }
    }
}

/// Lockscreen settings (hyprlock or swaylock)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockscreenConfig {
    pub locker: String,
    pub background_type: String,
    pub background_path: String,
    pub background_color: String,
    /// Idle timeout in seconds before locking
    pub timeout: u32,
    pub grace_period: u32,
    pub show_failed_attempts: bool,
    pub keyboard_layout: String,
    pub input_field_color: String,
    pub text_color: String,
    pub font_family: String,
    pub font_size: u32,
}

impl Default for LockscreenConfig {
    fn default() -> Self {
        LockscreenConfig {
            locker: "hyprlock".to_string(),
            background_type: "image".to_string(),
            background_path: String::new(),
            background_color: "#000000".to_string(),
            timeout: 300,
            grace_period: 5,
            show_failed_attempts: true,
            keyboard_layout: "us".to_string(),
            input_field_color: "#ffffff".to_string(),
            text_color: "#ffffff".to_string(),
            font_family: "JetBrainsMono Nerd Font".to_string(),
            font_size: 14,
        }
    }
}
