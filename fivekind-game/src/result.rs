//! Final standings and the game-over summary.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::state::{GamePhase, GameState, Player};
use crate::totals::PlayerTotals;

/// One ranked row of the final standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    /// 1-based position after sorting by grand total.
    pub place: usize,
    pub player: Player,
    pub totals: PlayerTotals,
    /// Shares the top grand total.
    pub is_winner: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Game is still in progress or not started.
    Pending,
    Winner,
    Tie,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Winner => write!(f, "winner"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// Summary shown on the game-over banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub outcome: Outcome,
    pub headline: String,
    pub top_score: u32,
    pub standings: Vec<Standing>,
}

impl GameSummary {
    #[must_use]
    pub fn winners(&self) -> impl Iterator<Item = &Standing> {
        self.standings.iter().filter(|s| s.is_winner)
    }
}

/// Rank players by grand total, highest first. Ties keep seating order.
#[must_use]
pub fn standings(state: &GameState) -> Vec<Standing> {
    let mut rows: Vec<(Player, PlayerTotals)> = state
        .players
        .iter()
        .filter_map(|player| {
            state
                .totals_for(&player.id)
                .map(|totals| (player.clone(), totals))
        })
        .collect();
    rows.sort_by(|a, b| b.1.grand_total.cmp(&a.1.grand_total));

    let top = rows.first().map_or(0, |(_, totals)| totals.grand_total);
    rows.into_iter()
        .enumerate()
        .map(|(idx, (player, totals))| Standing {
            place: idx + 1,
            is_winner: totals.grand_total == top,
            player,
            totals,
        })
        .collect()
}

/// Build the banner summary. Outcome is `Pending` until the game is over.
#[must_use]
pub fn game_summary(state: &GameState) -> GameSummary {
    let standings = standings(state);
    let top_score = standings.first().map_or(0, |s| s.totals.grand_total);
    let winner_count = standings.iter().filter(|s| s.is_winner).count();

    let (outcome, headline) = match (state.phase, winner_count) {
        (GamePhase::GameOver, 0) | (GamePhase::Setup | GamePhase::Playing, _) => {
            (Outcome::Pending, "Game in progress".to_string())
        }
        (GamePhase::GameOver, 1) => (
            Outcome::Winner,
            format!("{} wins!", standings[0].player.name),
        ),
        (GamePhase::GameOver, _) => (Outcome::Tie, "It's a tie!".to_string()),
    };

    GameSummary {
        outcome,
        headline,
        top_score,
        standings,
    }
}
