//! The transition function: `(state, action) -> state`.
//!
//! Every transition is total. Invalid actions return an unchanged copy of the
//! input and are logged at debug level; nothing here panics or errors.
use log::{debug, info};

use crate::action::GameAction;
use crate::config::GameConfig;
use crate::constants::MIN_PLAYERS;
use crate::error::Rejection;
use crate::state::{GamePhase, GameState, PlayerId};

/// Apply `action` under the default table configuration.
#[must_use]
pub fn reduce(state: &GameState, action: &GameAction) -> GameState {
    reduce_with(&GameConfig::default(), state, action)
}

/// Apply `action` to `state`, producing the next snapshot.
#[must_use]
pub fn reduce_with(cfg: &GameConfig, state: &GameState, action: &GameAction) -> GameState {
    if let Err(rejection) = validate_action(cfg, state, action) {
        debug!("ignoring {}: {rejection}", action.label());
        return state.clone();
    }

    match action {
        GameAction::StartGame { players } => {
            info!("starting game with {} players", players.len());
            GameState::with_players(players.clone())
        }
        GameAction::SetScore {
            player_id,
            category,
            value,
        } => {
            let mut next = state.clone();
            if let Some(sheet) = next
                .scores
                .iter_mut()
                .find(|sheet| &sheet.player_id == player_id)
            {
                sheet.categories.fill(*category, *value);
            }
            next.phase = if next.all_filled() {
                GamePhase::GameOver
            } else {
                GamePhase::Playing
            };
            if next.phase == GamePhase::GameOver && state.phase != GamePhase::GameOver {
                info!("final box filled by {player_id}; game over");
            }
            next
        }
        GameAction::AddBonusEvent { player_id } => {
            let mut next = state.clone();
            if let Some(sheet) = next
                .scores
                .iter_mut()
                .find(|sheet| &sheet.player_id == player_id)
            {
                sheet.bonus_count = sheet.bonus_count.saturating_add(1);
            }
            next
        }
        GameAction::ResetGame => {
            info!("game reset to setup");
            GameState::initial()
        }
        GameAction::RestoreState { state: snapshot } => snapshot.as_ref().clone(),
    }
}

/// Explain why `action` would be ignored, if it would be.
///
/// # Errors
///
/// Returns the [`Rejection`] describing the no-op the reducer would take.
pub fn validate_action(
    cfg: &GameConfig,
    state: &GameState,
    action: &GameAction,
) -> Result<(), Rejection> {
    match action {
        GameAction::StartGame { players } => {
            if cfg.accepts_roster(players.len()) {
                Ok(())
            } else {
                Err(Rejection::RosterSize {
                    count: players.len(),
                    min: MIN_PLAYERS,
                    max: cfg.max_players,
                })
            }
        }
        GameAction::SetScore {
            player_id,
            category,
            ..
        } => {
            let sheet = state
                .sheet(player_id)
                .ok_or_else(|| unknown_player(player_id))?;
            if sheet.categories.is_filled(*category) {
                return Err(Rejection::CategoryFilled {
                    player_id: player_id.to_string(),
                    category: *category,
                });
            }
            Ok(())
        }
        GameAction::AddBonusEvent { player_id } => {
            let sheet = state
                .sheet(player_id)
                .ok_or_else(|| unknown_player(player_id))?;
            if sheet.qualifies_for_bonus() {
                Ok(())
            } else {
                Err(Rejection::BonusNotQualified(player_id.to_string()))
            }
        }
        GameAction::ResetGame | GameAction::RestoreState { .. } => Ok(()),
    }
}

fn unknown_player(player_id: &PlayerId) -> Rejection {
    Rejection::UnknownPlayer(player_id.to_string())
}
