//! Centralized scoring and table constants for the Five-of-a-Kind engine.
//!
//! These values define the rules of the scorecard. Keeping them together
//! means the rules can only change through reviewed code, never through
//! runtime configuration.

// Table limits --------------------------------------------------------------
pub const MIN_PLAYERS: usize = 1;
pub const MAX_PLAYERS: usize = 6;

// Dice shape ----------------------------------------------------------------
pub const DICE_PER_ROLL: u16 = 5;
pub const DIE_FACES: u16 = 6;
/// Smallest non-zero sum five dice can produce.
pub const MIN_DICE_SUM: u16 = DICE_PER_ROLL;
/// Largest sum five dice can produce.
pub const MAX_DICE_SUM: u16 = DICE_PER_ROLL * DIE_FACES;

// Upper section -------------------------------------------------------------
pub const UPPER_BONUS_THRESHOLD: u16 = 63;
pub const UPPER_BONUS_VALUE: u16 = 35;

// Lower section fixed scores ------------------------------------------------
pub const FULL_HOUSE_SCORE: u16 = 25;
pub const SMALL_STRAIGHT_SCORE: u16 = 30;
pub const LARGE_STRAIGHT_SCORE: u16 = 40;
pub const FIVE_OF_A_KIND_SCORE: u16 = 50;

// Bonus events --------------------------------------------------------------
pub const BONUS_EVENT_VALUE: u16 = 100;

// Undo ----------------------------------------------------------------------
pub const UNDO_COMMIT_DELAY_MS: u64 = 500;

// Preferences ---------------------------------------------------------------
pub const THEME_PREFERENCE_KEY: &str = "five-of-a-kind-theme";

// Player defaults -----------------------------------------------------------
pub(crate) const DEFAULT_PLAYER_NAME_PREFIX: &str = "Player";
