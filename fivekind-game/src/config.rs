//! Table configuration for a scoring session.
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{MAX_PLAYERS, MIN_PLAYERS, UNDO_COMMIT_DELAY_MS};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    #[serde(default = "default_max_players")]
    pub max_players: usize,
    #[serde(default = "default_undo_commit_delay_ms")]
    pub undo_commit_delay_ms: u64,
}

const fn default_max_players() -> usize {
    MAX_PLAYERS
}

const fn default_undo_commit_delay_ms() -> u64 {
    UNDO_COMMIT_DELAY_MS
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_players: MAX_PLAYERS,
            undo_commit_delay_ms: UNDO_COMMIT_DELAY_MS,
        }
    }
}

impl GameConfig {
    /// Load configuration from a JSON document; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or `max_players` is below
    /// the table minimum.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Returns an error if `max_players` is below the table minimum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_players < MIN_PLAYERS {
            return Err(ConfigError::MaxPlayersTooSmall {
                min: MIN_PLAYERS,
                got: self.max_players,
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn undo_commit_delay(&self) -> Duration {
        Duration::from_millis(self.undo_commit_delay_ms)
    }

    #[must_use]
    pub const fn accepts_roster(&self, count: usize) -> bool {
        count >= MIN_PLAYERS && count <= self.max_players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_table_rules() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.max_players, 6);
        assert_eq!(cfg.undo_commit_delay(), Duration::from_millis(500));
        assert!(cfg.accepts_roster(1));
        assert!(cfg.accepts_roster(6));
        assert!(!cfg.accepts_roster(0));
        assert!(!cfg.accepts_roster(7));
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let cfg = GameConfig::from_json(r#"{"maxPlayers": 100}"#).unwrap();
        assert_eq!(cfg.max_players, 100);
        assert_eq!(cfg.undo_commit_delay_ms, 500);
        assert!(cfg.accepts_roster(100));
    }

    #[test]
    fn from_json_rejects_empty_tables() {
        let err = GameConfig::from_json(r#"{"maxPlayers": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MaxPlayersTooSmall { got: 0, .. }));
        assert!(GameConfig::from_json("not json").is_err());
    }

    #[test]
    fn json_keys_are_camel_case() {
        let value = serde_json::to_value(GameConfig::default()).unwrap();
        assert_eq!(value["maxPlayers"], 6);
        assert_eq!(value["undoCommitDelayMs"], 500);
        let cfg = GameConfig::from_json(r#"{"undoCommitDelayMs": 250}"#).unwrap();
        assert_eq!(cfg.undo_commit_delay_ms, 250);
        assert_eq!(cfg.max_players, 6);
    }
}
