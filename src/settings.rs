//! Data-driven controller settings loaded from RON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::climb::ClimbConfig;
use crate::player::PlayerConfig;

/// Player and climb configuration for one character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerConfig,
    pub climb: ClimbConfig,
}

impl Settings {
    /// Parses settings from RON text. Missing fields keep their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        ron::from_str(text).map_err(|e| SettingsError::Ron(e.to_string()))
    }

    /// Reads and parses a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("I/O while reading settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = Settings::from_ron_str("(climb: (wall_offset: 0.6))").unwrap();

        assert_eq!(settings.climb.wall_offset, 0.6);
        assert_eq!(settings.climb.climb_delay, ClimbConfig::default().climb_delay);
        assert_eq!(settings.player, PlayerConfig::default());
    }

    #[test]
    fn empty_struct_is_all_defaults() {
        assert_eq!(Settings::from_ron_str("()").unwrap(), Settings::default());
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = Settings::from_ron_str("(climb: (wall_offset: \"far\"))").unwrap_err();
        assert!(matches!(err, SettingsError::Ron(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Settings::load("does/not/exist.ron").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
