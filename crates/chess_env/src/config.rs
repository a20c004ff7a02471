//! Episode controller settings, loadable from TOML.
//!
//! ```toml
//! illegal_move_penalty = -0.1
//! runaway_penalty = -1.0
//! draw_reward = 0.5
//! min_illegal_threshold = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EnvError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvConfig {
    /// Reward for submitting a move that is not legal in the position.
    pub illegal_move_penalty: f64,
    /// Reward when the episode is cut off for persistent illegal play.
    pub runaway_penalty: f64,
    /// Reward for stepping a position that is already drawn.
    pub draw_reward: f64,
    /// Floor of the illegal-move budget; the budget grows with the game as
    /// `max(min_illegal_threshold, fullmove_number / 2)`.
    pub min_illegal_threshold: u32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            illegal_move_penalty: -0.1,
            runaway_penalty: -1.0,
            draw_reward: 0.5,
            min_illegal_threshold: 5,
        }
    }
}

impl EnvConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| EnvError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads `path` when it exists, otherwise falls back to the defaults.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EnvError::Config(e.to_string()))
    }

    /// Illegal attempts allowed before the episode is cut off.
    pub fn illegal_threshold(&self, fullmove_number: u32) -> u32 {
        self.min_illegal_threshold.max(fullmove_number / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = EnvConfig::default();
        assert_eq!(config.illegal_move_penalty, -0.1);
        assert_eq!(config.runaway_penalty, -1.0);
        assert_eq!(config.draw_reward, 0.5);
        assert_eq!(config.min_illegal_threshold, 5);
    }

    #[test]
    fn test_illegal_threshold_grows_with_game() {
        let config = EnvConfig::default();
        assert_eq!(config.illegal_threshold(1), 5);
        assert_eq!(config.illegal_threshold(10), 5);
        assert_eq!(config.illegal_threshold(11), 5);
        assert_eq!(config.illegal_threshold(12), 6);
        assert_eq!(config.illegal_threshold(40), 20);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EnvConfig::from_toml_str("min_illegal_threshold = 8\n").unwrap();
        assert_eq!(config.min_illegal_threshold, 8);
        assert_eq!(config.illegal_move_penalty, -0.1);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EnvConfig {
            draw_reward: 0.25,
            ..Default::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(EnvConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_unknown_and_malformed() {
        assert!(matches!(
            EnvConfig::from_toml_str("illegal_penalty = -0.1"),
            Err(EnvError::Config(_))
        ));
        assert!(matches!(
            EnvConfig::from_toml_str("draw_reward = \"half\""),
            Err(EnvError::Config(_))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let path = std::env::temp_dir().join("chess_env_config_does_not_exist.toml");
        assert_eq!(EnvConfig::load_or_default(&path).unwrap(), EnvConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("chess_env_config_{}.toml", std::process::id()));
        std::fs::write(&path, "runaway_penalty = -2.0\n").unwrap();
        let config = EnvConfig::load_or_default(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.runaway_penalty, -2.0);
    }
}
