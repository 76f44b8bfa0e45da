//! Constants for board geometry, search scoring, and difficulty tuning.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). The game is always played on a 3x3 board.
pub const N: usize = 3;

/// Total number of cells on the board.
pub const CELLS: usize = N * N;

// =============================================================================
// Search Scoring
// =============================================================================

/// Base score of a won terminal position.
///
/// A win found `depth` plies below the searched position scores
/// `WIN_SCORE - depth` for the winner, so faster wins and slower losses
/// are preferred.
pub const WIN_SCORE: i32 = 10;

/// Score of a full board with no winner.
pub const DRAW_SCORE: i32 = 0;

// =============================================================================
// Difficulty Tuning
// =============================================================================

/// Probability that Easy plays a random legal move instead of searching.
pub const PROB_RANDOM_EASY: f64 = 0.7;

/// Probability that Medium plays a random legal move instead of searching.
pub const PROB_RANDOM_MEDIUM: f64 = 0.3;

// =============================================================================
// Presentation
// =============================================================================

/// Default pause before the computer answers, in milliseconds.
pub const THINK_DELAY_MS: u64 = 500;

/// Symbol used for the human player's mark.
pub const SYMBOL_HUMAN: char = 'X';

/// Symbol used for the computer's mark.
pub const SYMBOL_AI: char = 'O';

/// Symbol used for an empty cell when rendering.
pub const SYMBOL_EMPTY: char = ' ';
