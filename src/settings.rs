//! Game settings and tunables
//!
//! Read from LocalStorage on the web, from a JSON file natively.
//! The window size is fixed and deliberately absent here.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Game settings/tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of snowflake slots (fixed for the lifetime of a run)
    pub snowflake_count: usize,
    /// Pixels the player moves per tick per held direction
    pub player_step: f32,
    /// Pointer radius within which a click hides snowflakes
    pub hide_radius: f32,
    /// Lives at the start of a run (1..=3)
    pub starting_lives: u8,
    /// Fixed RNG seed; `None` seeds from the host clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snowflake_count: SNOWFLAKE_COUNT,
            player_step: PLAYER_STEP,
            hide_radius: HIDE_RADIUS,
            starting_lives: MAX_LIVES,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "snow_dodge_settings";

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.snowflake_count == 0 {
            return Err(SettingsError::Invalid {
                field: "snowflake_count",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.player_step.is_finite() || self.player_step <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "player_step",
                reason: format!("must be a positive number, got {}", self.player_step),
            });
        }
        if !self.hide_radius.is_finite() || self.hide_radius <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "hide_radius",
                reason: format!("must be a positive number, got {}", self.hide_radius),
            });
        }
        if !(1..=MAX_LIVES).contains(&self.starting_lives) {
            return Err(SettingsError::Invalid {
                field: "starting_lives",
                reason: format!("must be between 1 and {MAX_LIVES}, got {}", self.starting_lives),
            });
        }
        Ok(())
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_rules() {
        let settings = Settings::default();
        assert_eq!(settings.snowflake_count, 100);
        assert_eq!(settings.starting_lives, 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "player_step": 8.0 }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.player_step, 8.0);
        assert_eq!(settings.snowflake_count, SNOWFLAKE_COUNT);
    }

    #[test]
    fn test_rejects_out_of_range_lives() {
        let err = Settings::from_json(r#"{ "starting_lives": 5 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "starting_lives",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_field() {
        let settings = Settings {
            snowflake_count: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_serialized_settings_load_back() {
        let settings = Settings {
            seed: Some(7),
            starting_lives: 2,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ nope").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
