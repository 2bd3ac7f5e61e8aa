//! Authoritative game state snapshots.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::category::Category;
use crate::sheet::PlayerScoreSheet;
use crate::totals::PlayerTotals;

/// Opaque player identity, generated once at game start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    #[default]
    Setup,
    Playing,
    GameOver,
}

impl GamePhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Playing => "playing",
            Self::GameOver => "gameOver",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GamePhase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "setup" => Ok(Self::Setup),
            "playing" => Ok(Self::Playing),
            "gameOver" => Ok(Self::GameOver),
            _ => Err(()),
        }
    }
}

/// Phase, roster and one sheet per player, index-aligned with `players`.
///
/// Snapshots are value objects: transitions build a new one rather than
/// mutating the current one, which is what lets undo restore by copy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub players: Vec<Player>,
    pub scores: Vec<PlayerScoreSheet>,
}

impl GameState {
    /// The empty `setup` state every session starts in.
    #[must_use]
    pub fn initial() -> Self {
        Self::default()
    }

    /// A fresh `playing` state with one open sheet per player.
    #[must_use]
    pub fn with_players(players: Vec<Player>) -> Self {
        let scores = players
            .iter()
            .map(|player| PlayerScoreSheet::new(player.id.clone()))
            .collect();
        Self {
            phase: GamePhase::Playing,
            players,
            scores,
        }
    }

    #[must_use]
    pub fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| &player.id == player_id)
    }

    #[must_use]
    pub fn sheet(&self, player_id: &PlayerId) -> Option<&PlayerScoreSheet> {
        self.scores.iter().find(|sheet| &sheet.player_id == player_id)
    }

    #[must_use]
    pub fn score(&self, player_id: &PlayerId, category: Category) -> Option<u16> {
        self.sheet(player_id)
            .and_then(|sheet| sheet.categories.get(category))
    }

    /// Totals for one player, derived from their sheet.
    #[must_use]
    pub fn totals_for(&self, player_id: &PlayerId) -> Option<PlayerTotals> {
        self.sheet(player_id).map(PlayerScoreSheet::totals)
    }

    /// True when every category of every sheet is filled. An empty roster
    /// never counts as finished.
    #[must_use]
    pub fn all_filled(&self) -> bool {
        !self.scores.is_empty() && self.scores.iter().all(PlayerScoreSheet::is_complete)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Roster and sheets line up by position and id.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.players.len() == self.scores.len()
            && self
                .players
                .iter()
                .zip(&self.scores)
                .all(|(player, sheet)| player.id == sheet.player_id)
    }

    /// Serialize the snapshot for export.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load a previously exported snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a game state.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Player> {
        vec![Player::new("a", "Ada"), Player::new("b", "Bo")]
    }

    #[test]
    fn initial_state_is_empty_setup() {
        let state = GameState::initial();
        assert_eq!(state.phase, GamePhase::Setup);
        assert!(state.players.is_empty());
        assert!(state.scores.is_empty());
        assert!(!state.all_filled());
    }

    #[test]
    fn with_players_builds_aligned_open_sheets() {
        let state = GameState::with_players(roster());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.is_aligned());
        for sheet in &state.scores {
            assert_eq!(sheet.categories.filled_count(), 0);
            assert_eq!(sheet.bonus_count, 0);
        }
        assert_eq!(state.player(&PlayerId::from("b")).unwrap().name, "Bo");
        assert!(state.sheet(&PlayerId::from("zz")).is_none());
    }

    #[test]
    fn json_shape_uses_camel_case_keys() {
        let state = GameState::with_players(roster());
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["phase"], "playing");
        assert_eq!(value["scores"][0]["playerId"], "a");
        assert_eq!(value["scores"][0]["bonusCount"], 0);

        let restored = GameState::from_json(&state.to_json().unwrap()).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn phase_parses_from_wire_names() {
        assert_eq!("gameOver".parse::<GamePhase>(), Ok(GamePhase::GameOver));
        assert!("over".parse::<GamePhase>().is_err());
    }
}
