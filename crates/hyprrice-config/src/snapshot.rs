//! Versioned configuration snapshots and their wire codec
//!
//! A snapshot is a schema'd map of section name to key/value settings,
//! tagged with a format version so corrupt or foreign documents are
//! rejected on read instead of silently misapplied.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Snapshot format version understood by this build
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// A single setting value inside a snapshot section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Boolean flag
    Bool(bool),
    /// Integer setting
    Int(i64),
    /// Floating point setting
    Float(f64),
    /// Text setting
    String(String),
    /// Ordered list of values
    List(Vec<SettingValue>),
}

/// Settings of one configuration section, keyed by setting name
pub type SectionSnapshot = BTreeMap<String, SettingValue>;

/// A serialized, restorable copy of the entire configuration at one instant
///
/// Snapshots are immutable once captured. `BTreeMap` keeps both section
/// and key order deterministic, so encoding the same snapshot always
/// yields the same bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// Format version stamped at capture time
    pub version: u32,
    /// Section name to settings map
    pub sections: BTreeMap<String, SectionSnapshot>,
}

impl ConfigSnapshot {
    /// Create a snapshot from a section map, stamped with the current format version
    pub fn new(sections: BTreeMap<String, SectionSnapshot>) -> Self {
        ConfigSnapshot {
            version: SNAPSHOT_FORMAT_VERSION,
            sections,
        }
    }

    /// Get the settings of a named section
    pub fn section(&self, name: &str) -> Option<&SectionSnapshot> {
        self.sections.get(name)
    }

    /// Encode to YAML (the on-disk backup representation)
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Decode from YAML, rejecting unknown format versions
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let snapshot: ConfigSnapshot = serde_yaml::from_str(text)?;
        snapshot.validate_version()
    }

    /// Encode to JSON (the history mirror representation)
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON, rejecting unknown format versions
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let snapshot: ConfigSnapshot = serde_json::from_str(text)?;
        snapshot.validate_version()
    }

    fn validate_version(self) -> Result<Self, ConfigError> {
        if self.version != SNAPSHOT_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedSnapshotVersion {
                found: self.version,
                expected: SNAPSHOT_FORMAT_VERSION,
            });
        }
        Ok(self)
    }
}

/// Objects whose full state can be captured as a snapshot and restored from one
///
/// Implementors must validate the snapshot shape before mutating any
/// state, so a failed `apply_snapshot` leaves the object unchanged.
pub trait Snapshotable {
    /// Capture the current state as a snapshot
    fn to_snapshot(&self) -> Result<ConfigSnapshot, ConfigError>;

    /// Restore state from a snapshot, all-or-nothing
    fn apply_snapshot(&mut self, snapshot: &ConfigSnapshot) -> Result<(), ConfigError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> ConfigSnapshot {
        let mut section = SectionSnapshot::new();
        section.insert("border_size".to_string(), SettingValue::Int(2));
        section.insert("window_opacity".to_string(), SettingValue::Float(0.95));
        section.insert("blur_enabled".to_string(), SettingValue::Bool(true));
        section.insert(
            "border_color".to_string(),
            SettingValue::String("#5e81ac".to_string()),
        );

        let mut modules = SectionSnapshot::new();
        modules.insert(
            "modules".to_string(),
            SettingValue::List(vec![
                SettingValue::String("clock".to_string()),
                SettingValue::String("battery".to_string()),
            ]),
        );

        let mut sections = BTreeMap::new();
        sections.insert("hyprland".to_string(), section);
        sections.insert("waybar".to_string(), modules);
        ConfigSnapshot::new(sections)
    }

    #[test]
    fn test_yaml_round_trip() {
        let snapshot = sample_snapshot();
        let text = snapshot.to_yaml().unwrap();
        let decoded = ConfigSnapshot::from_yaml(&text).unwrap();
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = sample_snapshot();
        let text = snapshot.to_json().unwrap();
        let decoded = ConfigSnapshot::from_json(&text).unwrap();
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn test_encoding_is_byte_stable() {
        let snapshot = sample_snapshot();
        let first = snapshot.to_yaml().unwrap();
        let second = ConfigSnapshot::from_yaml(&first).unwrap().to_yaml().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let mut snapshot = sample_snapshot();
        snapshot.version = 99;
        let text = snapshot.to_yaml().unwrap();
        let result = ConfigSnapshot::from_yaml(&text);
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedSnapshotVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_malformed_document_rejected() {
        assert!(ConfigSnapshot::from_yaml("not: [valid").is_err());
        assert!(ConfigSnapshot::from_json("{ invalid json }").is_err());
    }

    #[test]
    fn test_section_lookup() {
        let snapshot = sample_snapshot();
        assert!(snapshot.section("hyprland").is_some());
        assert!(snapshot.section("plasma").is_none());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn key_strategy() -> impl Strategy<Value = String> {
        r"[a-z][a-z0-9_]{0,20}".prop_map(|s| s.to_string())
    }

    fn setting_strategy() -> impl Strategy<Value = SettingValue> {
        let leaf = prop_oneof![
            any::<bool>().prop_map(SettingValue::Bool),
            any::<i64>().prop_map(SettingValue::Int),
            (-1.0e6f64..1.0e6).prop_map(SettingValue::Float),
            r"[a-zA-Z0-9 #._/-]{0,30}".prop_map(SettingValue::String),
        ];
        leaf.prop_recursive(2, 16, 4, |inner| {
            prop::collection::vec(inner, 0..4).prop_map(SettingValue::List)
        })
    }

    fn snapshot_strategy() -> impl Strategy<Value = ConfigSnapshot> {
        prop::collection::btree_map(
            key_strategy(),
            prop::collection::btree_map(key_strategy(), setting_strategy(), 0..6),
            0..4,
        )
        .prop_map(ConfigSnapshot::new)
    }

    proptest! {
        /// Any snapshot survives the YAML codec unchanged.
        #[test]
        fn prop_yaml_round_trip(snapshot in snapshot_strategy()) {
            let text = snapshot.to_yaml().unwrap();
            let decoded = ConfigSnapshot::from_yaml(&text).unwrap();
            prop_assert_eq!(&snapshot, &decoded);
        }

        /// Any snapshot survives the JSON codec unchanged.
        #[test]
        fn prop_json_round_trip(snapshot in snapshot_strategy()) {
            let text = snapshot.to_json().unwrap();
            let decoded = ConfigSnapshot::from_json(&text).unwrap();
            prop_assert_eq!(&snapshot, &decoded);
        }

        /// Encoding the same snapshot twice yields identical bytes.
        #[test]
        fn prop_encoding_deterministic(snapshot in snapshot_strategy()) {
            let first = snapshot.to_yaml().unwrap();
            let second = ConfigSnapshot::from_yaml(&first).unwrap().to_yaml().unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
