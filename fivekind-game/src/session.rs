//! Composition layer owning the current snapshot and its undo log.
use log::debug;
use rand::Rng;
use std::time::Instant;

use crate::action::GameAction;
use crate::category::Category;
use crate::config::GameConfig;
use crate::error::Rejection;
use crate::reducer::{reduce_with, validate_action};
use crate::roster::roster_from_names;
use crate::state::{GamePhase, GameState, PlayerId};
use crate::totals::PlayerTotals;
use crate::undo::{UndoHighlight, UndoLog};

/// Application-layer wrapper owning the current snapshot and its undo history.
///
/// Every change goes through [`ScoreSession::dispatch`], which routes score
/// entries through the undo log before they reach the reducer.
#[derive(Debug, Clone)]
pub struct ScoreSession {
    config: GameConfig,
    state: GameState,
    undo: UndoLog,
}

impl Default for ScoreSession {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl ScoreSession {
    /// Construct a session in the empty `setup` state.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let undo = UndoLog::new(config.undo_commit_delay());
        Self {
            config,
            state: GameState::initial(),
            undo,
        }
    }

    /// Resume from an imported snapshot. Undo history starts empty.
    #[must_use]
    pub fn from_state(config: GameConfig, state: GameState) -> Self {
        let mut session = Self::new(config);
        session.state = state;
        session
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Borrow the current immutable snapshot.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.state.phase
    }

    #[must_use]
    pub fn totals_for(&self, player_id: &PlayerId) -> Option<PlayerTotals> {
        self.state.totals_for(player_id)
    }

    /// Route an action through the undo log and into the reducer.
    pub fn dispatch(&mut self, action: GameAction) {
        if action.is_game_boundary() {
            // a rejected roster is a no-op and must not touch undo history
            if let Err(rejection) = validate_action(&self.config, &self.state, &action) {
                debug!("ignoring {}: {rejection}", action.label());
                return;
            }
            self.undo.clear();
            self.apply(&action);
            return;
        }

        self.flush_pending_restore();
        if matches!(action, GameAction::SetScore { .. }) {
            let before = self.state.clone();
            self.apply(&action);
            if self.state != before {
                self.undo.record(before);
            }
        } else {
            self.apply(&action);
        }
    }

    /// Build a roster from display names and start a game with it.
    pub fn start_game<R: Rng + ?Sized>(&mut self, names: &[&str], rng: &mut R) {
        let players = roster_from_names(names, rng);
        self.dispatch(GameAction::StartGame { players });
    }

    pub fn set_score(&mut self, player_id: &PlayerId, category: Category, value: u16) {
        self.dispatch(GameAction::set_score(player_id.clone(), category, value));
    }

    pub fn add_bonus_event(&mut self, player_id: &PlayerId) {
        self.dispatch(GameAction::add_bonus_event(player_id.clone()));
    }

    /// Return to setup. Also what a platform back button maps to.
    pub fn reset(&mut self) {
        self.dispatch(GameAction::ResetGame);
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    /// Arm the most recent snapshot for restore and report the cell it will
    /// clear. A restore armed by an earlier call is applied right away.
    pub fn undo(&mut self) -> Option<UndoHighlight> {
        let step = self.undo.undo(&self.state)?;
        if let Some(superseded) = step.superseded {
            self.apply(&superseded);
        }
        step.highlight
    }

    /// [`Self::undo`] for callers that want an empty history reported.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::NothingToUndo`] when no snapshot is left to arm.
    pub fn try_undo(&mut self) -> Result<Option<UndoHighlight>, Rejection> {
        if self.undo.depth() == 0 {
            return Err(Rejection::NothingToUndo);
        }
        Ok(self.undo())
    }

    #[must_use]
    pub fn pending_highlight(&self) -> Option<&UndoHighlight> {
        self.undo.pending_highlight()
    }

    /// Start the commit delay for an armed undo.
    pub fn commit_pending_restore(&mut self, now: Instant) -> bool {
        self.undo.commit_pending_restore(now)
    }

    /// Apply a committed undo once its delay has elapsed. Returns whether the
    /// state changed hands.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.undo.poll(now) {
            Some(restore) => {
                self.apply(&restore);
                true
            }
            None => false,
        }
    }

    /// Apply an armed undo immediately, skipping the delay.
    pub fn flush_pending_restore(&mut self) -> bool {
        match self.undo.flush() {
            Some(restore) => {
                debug!("pending undo flushed");
                self.apply(&restore);
                true
            }
            None => false,
        }
    }

    /// Consume the session, returning the current snapshot.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    fn apply(&mut self, action: &GameAction) {
        self.state = reduce_with(&self.config, &self.state, action);
    }
}
