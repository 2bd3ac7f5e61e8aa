//! Error types for the edges of the engine.
//!
//! State transitions never fail; these cover identifier parsing, configuration
//! loading and the optional strict reporting of ignored actions.
use thiserror::Error;

use crate::category::Category;

/// A category key that is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scoring category `{0}`")]
pub struct ParseCategoryError(pub String);

/// A theme id that is not part of the theme catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme `{0}`")]
pub struct ParseThemeError(pub String);

/// Failure to load or validate a [`crate::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid game config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("max_players must be at least {min}, got {got}")]
    MaxPlayersTooSmall { min: usize, got: usize },
}

/// Why a dispatched action left the state unchanged.
///
/// The reducer itself stays total and only logs these; callers that want
/// explicit reporting can ask [`crate::validate_action`] up front.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("roster of {count} players is outside {min}..={max}")]
    RosterSize { count: usize, min: usize, max: usize },
    #[error("unknown player `{0}`")]
    UnknownPlayer(String),
    #[error("{category} is already filled for player `{player_id}`")]
    CategoryFilled {
        player_id: String,
        category: Category,
    },
    #[error("player `{0}` has not scored five of a kind at its maximum")]
    BonusNotQualified(String),
    #[error("nothing to undo")]
    NothingToUndo,
}
