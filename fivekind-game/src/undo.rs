//! Snapshot-based undo with a delayed commit.
//!
//! The log sits in front of the reducer. It stores full pre-state copies for
//! score entries and hands back `RESTORE_STATE` actions for the caller to
//! apply; it never touches the current state itself. A popped snapshot is
//! armed first and only released once the presentation layer commits it and
//! the commit delay has elapsed, so the undone cell can flash before its
//! value disappears.
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::action::GameAction;
use crate::category::Category;
use crate::constants::UNDO_COMMIT_DELAY_MS;
use crate::state::{GameState, PlayerId};

/// The cell an armed undo is about to clear.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoHighlight {
    pub player_id: PlayerId,
    pub category: Category,
}

#[derive(Debug, Clone)]
struct PendingRestore {
    snapshot: GameState,
    highlight: Option<UndoHighlight>,
    due_at: Option<Instant>,
}

impl PendingRestore {
    fn into_action(self) -> GameAction {
        GameAction::restore(self.snapshot)
    }
}

/// Result of arming an undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoStep {
    /// A previously armed restore that was superseded and must be applied now.
    pub superseded: Option<GameAction>,
    /// The cell the newly armed restore will clear, if one differs.
    pub highlight: Option<UndoHighlight>,
}

#[derive(Debug, Clone)]
pub struct UndoLog {
    stack: Vec<GameState>,
    pending: Option<PendingRestore>,
    delay: Duration,
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new(Duration::from_millis(UNDO_COMMIT_DELAY_MS))
    }
}

impl UndoLog {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            stack: Vec::new(),
            pending: None,
            delay,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Snapshots waiting on the stack, not counting an armed restore.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.stack.is_empty() || self.pending.is_some()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn pending_highlight(&self) -> Option<&UndoHighlight> {
        self.pending.as_ref().and_then(|p| p.highlight.as_ref())
    }

    /// When the armed restore becomes due, once committed.
    #[must_use]
    pub fn pending_due_at(&self) -> Option<Instant> {
        self.pending.as_ref().and_then(|p| p.due_at)
    }

    /// Push an independent copy of the state as it was before a score entry.
    pub fn record(&mut self, before: GameState) {
        self.stack.push(before);
    }

    /// Forget all history and cancel any armed restore. Used at game boundaries.
    pub fn clear(&mut self) {
        if self.pending.take().is_some() {
            debug!("pending undo cancelled by game boundary");
        }
        self.stack.clear();
    }

    /// Pop the latest snapshot and arm it for restore.
    ///
    /// Returns `None` when the stack is empty. If another restore was already
    /// armed it is released in [`UndoStep::superseded`] and must be applied
    /// before the caller reads the state again.
    pub fn undo(&mut self, current: &GameState) -> Option<UndoStep> {
        let snapshot = self.stack.pop()?;
        let superseded = self.pending.take();
        let baseline = superseded.as_ref().map_or(current, |p| &p.snapshot);
        let highlight = changed_cell(&snapshot, baseline);
        debug!(
            "undo armed ({} left); highlight {:?}",
            self.stack.len(),
            highlight
        );
        self.pending = Some(PendingRestore {
            snapshot,
            highlight: highlight.clone(),
            due_at: None,
        });
        Some(UndoStep {
            superseded: superseded.map(PendingRestore::into_action),
            highlight,
        })
    }

    /// Start the commit countdown for the armed restore. Calling it again
    /// does not push the deadline back. Returns whether a restore is armed.
    pub fn commit_pending_restore(&mut self, now: Instant) -> bool {
        let delay = self.delay;
        match self.pending.as_mut() {
            Some(pending) => {
                pending.due_at.get_or_insert(now + delay);
                true
            }
            None => false,
        }
    }

    /// Release the armed restore if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<GameAction> {
        let due = self
            .pending
            .as_ref()
            .and_then(|p| p.due_at)
            .is_some_and(|due_at| now >= due_at);
        if due {
            debug!("undo restore committed");
            self.pending.take().map(PendingRestore::into_action)
        } else {
            None
        }
    }

    /// Release the armed restore immediately, committed or not.
    pub fn flush(&mut self) -> Option<GameAction> {
        self.pending.take().map(PendingRestore::into_action)
    }
}

/// The first cell, by player then category order, that is open in `before`
/// but filled in `after`. Players are matched by id, not position.
#[must_use]
pub fn changed_cell(before: &GameState, after: &GameState) -> Option<UndoHighlight> {
    before.scores.iter().find_map(|old| {
        let new = after.sheet(&old.player_id)?;
        Category::ALL
            .into_iter()
            .find(|category| {
                !old.categories.is_filled(*category) && new.categories.is_filled(*category)
            })
            .map(|category| UndoHighlight {
                player_id: old.player_id.clone(),
                category,
            })
    })
}
