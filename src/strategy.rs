//! Move-selection policies and difficulty levels.
//!
//! The deterministic search lives in [`crate::search`]. Lower difficulties
//! wrap it in [`RandomFallback`], which sometimes plays a uniformly random
//! legal move instead. The random source is always passed in, so a seeded
//! [`fastrand::Rng`] makes every policy reproducible.

use std::fmt;

use tracing::debug;

use crate::board::{Board, Mark, Move};
use crate::constants::{PROB_RANDOM_EASY, PROB_RANDOM_MEDIUM};
use crate::search::Searcher;

/// Computer strength, chosen once per session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    /// Interpret a menu answer or difficulty name.
    ///
    /// Accepts `1`/`2`/`3` and `easy`/`medium`/`hard` in any case.
    /// Anything else falls back to [`Difficulty::Hard`].
    pub fn from_choice(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "1" | "easy" => Difficulty::Easy,
            "2" | "medium" => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    /// Chance of substituting a random move for the searched one.
    pub fn random_move_probability(self) -> f64 {
        match self {
            Difficulty::Easy => PROB_RANDOM_EASY,
            Difficulty::Medium => PROB_RANDOM_MEDIUM,
            Difficulty::Hard => 0.0,
        }
    }

    /// Build the move-selection policy for this difficulty.
    pub fn selector(self) -> Box<dyn MoveSelector> {
        match self {
            Difficulty::Hard => Box::new(OptimalSearch::default()),
            other => Box::new(RandomFallback::new(
                other.random_move_probability(),
                OptimalSearch::default(),
            )),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// A way of choosing the computer's next move.
///
/// Implementations may mutate `board` while deciding but must leave it as
/// they found it.
pub trait MoveSelector {
    fn select(
        &mut self,
        board: &mut Board,
        ai: Mark,
        human: Mark,
        rng: &mut fastrand::Rng,
    ) -> Option<Move>;
}

/// Full minimax search. Never consults the random source.
#[derive(Debug, Default)]
pub struct OptimalSearch {
    nodes: u64,
}

impl OptimalSearch {
    /// Nodes visited by the most recent selection.
    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }
}

impl MoveSelector for OptimalSearch {
    fn select(
        &mut self,
        board: &mut Board,
        ai: Mark,
        human: Mark,
        _rng: &mut fastrand::Rng,
    ) -> Option<Move> {
        let mut searcher = Searcher::new(ai, human);
        let mv = searcher.best_move(board);
        self.nodes = searcher.nodes_searched();
        mv
    }
}

/// Plays a random empty cell with the given probability, else defers to `inner`.
#[derive(Debug)]
pub struct RandomFallback<S> {
    probability: f64,
    inner: S,
}

impl<S: MoveSelector> RandomFallback<S> {
    pub fn new(probability: f64, inner: S) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "probability {probability} outside [0, 1]"
        );
        Self { probability, inner }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl<S: MoveSelector> MoveSelector for RandomFallback<S> {
    fn select(
        &mut self,
        board: &mut Board,
        ai: Mark,
        human: Mark,
        rng: &mut fastrand::Rng,
    ) -> Option<Move> {
        // One draw per call, taken before looking at the board.
        if rng.f64() < self.probability {
            let empty = board.empty_cells();
            if !empty.is_empty() {
                let mv = empty[rng.usize(..empty.len())];
                debug!(row = mv.row, col = mv.col, "playing random move");
                return Some(mv);
            }
        }
        self.inner.select(board, ai, human, rng)
    }
}

/// Choose the computer's move for `difficulty`.
///
/// `board` is borrowed as scratch space and is unchanged on return.
/// Returns `None` only when the board is full.
pub fn select_move(
    board: &mut Board,
    ai: Mark,
    human: Mark,
    difficulty: Difficulty,
    rng: &mut fastrand::Rng,
) -> Option<Move> {
    difficulty.selector().select(board, ai, human, rng)
}
