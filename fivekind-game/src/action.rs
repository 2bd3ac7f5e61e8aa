//! Serializable intents fed into the reducer.
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::state::{GameState, Player, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameAction {
    StartGame {
        players: Vec<Player>,
    },
    #[serde(rename_all = "camelCase")]
    SetScore {
        player_id: PlayerId,
        category: Category,
        value: u16,
    },
    #[serde(rename_all = "camelCase")]
    AddBonusEvent {
        player_id: PlayerId,
    },
    ResetGame,
    /// Wholesale replacement; only the undo log should issue this.
    RestoreState {
        state: Box<GameState>,
    },
}

impl GameAction {
    #[must_use]
    pub fn set_score(player_id: impl Into<PlayerId>, category: Category, value: u16) -> Self {
        Self::SetScore {
            player_id: player_id.into(),
            category,
            value,
        }
    }

    #[must_use]
    pub fn add_bonus_event(player_id: impl Into<PlayerId>) -> Self {
        Self::AddBonusEvent {
            player_id: player_id.into(),
        }
    }

    #[must_use]
    pub fn restore(state: GameState) -> Self {
        Self::RestoreState {
            state: Box::new(state),
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::StartGame { .. } => "START_GAME",
            Self::SetScore { .. } => "SET_SCORE",
            Self::AddBonusEvent { .. } => "ADD_BONUS_EVENT",
            Self::ResetGame => "RESET_GAME",
            Self::RestoreState { .. } => "RESTORE_STATE",
        }
    }

    /// Actions that begin or end a game; undo history never crosses them.
    #[must_use]
    pub const fn is_game_boundary(&self) -> bool {
        matches!(self, Self::StartGame { .. } | Self::ResetGame)
    }
}
