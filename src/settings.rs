//! Game settings and preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::persistence::StorageError;
use crate::sim::Field;

/// LocalStorage key for the settings JSON
pub const STORAGE_KEY: &str = "mini_rush_settings";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    /// Play-field width in logical units
    pub field_width: f32,
    /// Play-field height in logical units
    pub field_height: f32,

    // === Visual Effects ===
    /// Skip the scrolling speed lines at the road edges
    pub reduced_motion: bool,

    // === HUD ===
    /// Show the score overlay
    pub show_hud: bool,

    // === Demo ===
    /// Let the autopilot pick lanes
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            reduced_motion: false,
            show_hud: true,
            autopilot: false,
        }
    }
}

impl Settings {
    /// Field geometry for these settings
    pub fn field(&self) -> Field {
        Field::new(self.field_width, self.field_height)
    }

    /// Whether the renderer should draw speed lines
    pub fn speed_lines(&self) -> bool {
        !self.reduced_motion
    }

    /// Parse settings JSON, falling back to defaults if it is malformed
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) if settings.is_valid() => settings,
            Ok(_) => {
                log::warn!("Stored settings have an unusable field size, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    fn is_valid(&self) -> bool {
        self.field_width.is_finite()
            && self.field_height.is_finite()
            && self.field_width > 0.0
            && self.field_height > 0.0
    }

    /// Serialized form kept in LocalStorage
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|e| StorageError::Write(e.to_string()))
    }

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }

    /// Load settings from LocalStorage, or defaults when nothing is stored
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match Self::storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten()) {
            Some(json) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Persist settings to LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), StorageError> {
        let json = self.to_json()?;
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(STORAGE_KEY, &json)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))?;
        log::debug!("Settings saved");
        Ok(())
    }

    /// Native builds have no settings store
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), StorageError> {
        self.to_json().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_reference_field() {
        let settings = Settings::default();
        assert_eq!(settings.field(), Field::new(400.0, 700.0));
        assert!(settings.speed_lines());
        assert!(!settings.autopilot);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"reduced_motion": true}"#);
        assert!(settings.reduced_motion);
        assert!(!settings.speed_lines());
        assert_eq!(settings.field_width, FIELD_WIDTH);
        assert!(settings.show_hud);
    }

    #[test]
    fn test_malformed_json_uses_defaults() {
        assert_eq!(Settings::from_json("{nope"), Settings::default());
        assert_eq!(
            Settings::from_json(r#"{"field_width": -4.0}"#),
            Settings::default()
        );
    }

    #[test]
    fn test_round_trip() {
        let settings = Settings {
            field_width: 800.0,
            field_height: 1400.0,
            autopilot: true,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json), settings);
    }

    #[test]
    fn test_save_succeeds_natively() {
        assert!(Settings::default().save().is_ok());
    }
}
