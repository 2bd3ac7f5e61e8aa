//! Five-of-a-Kind Scoring Engine
//!
//! Platform-agnostic scorecard logic for the Five-of-a-Kind dice game tracker.
//! This crate provides the category catalog, totals, the game state machine
//! and undo without UI or platform-specific dependencies.

pub mod action;
pub mod category;
pub mod config;
pub mod constants;
pub mod error;
pub mod reducer;
pub mod result;
pub mod roster;
pub mod session;
pub mod sheet;
pub mod state;
pub mod theme;
pub mod totals;
pub mod undo;

// Re-export commonly used types
pub use action::GameAction;
pub use category::{
    CATEGORY_COUNT, Category, CategoryMeta, EntryKind, LegalValues, Section, by_section, catalog,
};
pub use config::GameConfig;
pub use error::{ConfigError, ParseCategoryError, ParseThemeError, Rejection};
pub use reducer::{reduce, reduce_with, validate_action};
pub use result::{GameSummary, Outcome, Standing, game_summary, standings};
pub use roster::{display_name, generate_player_id, roster_from_names};
pub use session::ScoreSession;
pub use sheet::{CategoryScores, PlayerScoreSheet};
pub use state::{GamePhase, GameState, Player, PlayerId};
pub use theme::{THEMES, ThemeId, ThemeInfo, load_theme, save_theme};
pub use totals::{PlayerTotals, compute_totals};
pub use undo::{UndoHighlight, UndoLog, UndoStep, changed_cell};

/// Trait for abstracting the platform's key-value preference storage
/// Platform-specific implementations should provide this
pub trait PreferenceStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read a stored string value
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write a string value
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}
