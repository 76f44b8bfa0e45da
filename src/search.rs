//! Minimax search with alpha-beta pruning.
//!
//! The search runs every line to a terminal position; on a 3x3 board that is
//! at most nine plies. Candidate moves are tried in place on the caller's
//! board and undone before the next candidate, so the board comes back
//! exactly as it went in.
//!
//! Scores are from the computer's point of view:
//! - computer win at depth `d`: `WIN_SCORE - d`
//! - human win at depth `d`: `d - WIN_SCORE`
//! - draw: `DRAW_SCORE`

use tracing::debug;

use crate::board::{Board, Mark, Move};
use crate::constants::{DRAW_SCORE, WIN_SCORE};

/// Exhaustive minimax searcher for one pair of marks.
pub struct Searcher {
    /// Mark of the maximizing side
    ai: Mark,
    /// Mark of the minimizing side
    human: Mark,
    /// Nodes visited by the last search
    nodes: u64,
}

impl Searcher {
    pub fn new(ai: Mark, human: Mark) -> Self {
        Self { ai, human, nodes: 0 }
    }

    /// Number of positions evaluated during the last call to [`Searcher::best_move`].
    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    /// Pick the best move for the maximizing side.
    ///
    /// Candidates are visited in row-major order and a later candidate only
    /// replaces the current choice if it scores strictly higher, so ties go
    /// to the earliest cell. Returns `None` on a full board.
    pub fn best_move(&mut self, board: &mut Board) -> Option<Move> {
        debug_assert!(
            !board.winner(self.ai) && !board.winner(self.human),
            "search requested on a finished game"
        );
        self.nodes = 0;

        let mut best_score = i32::MIN;
        let mut best = None;

        for mv in board.empty_cells() {
            board.place(mv.row, mv.col, self.ai);
            let score = self.minimax(board, 0, false, i32::MIN, i32::MAX);
            board.clear(mv.row, mv.col);

            if score > best_score {
                best_score = score;
                best = Some(mv);
            }
        }

        if let Some(mv) = best {
            debug!(
                row = mv.row,
                col = mv.col,
                score = best_score,
                nodes = self.nodes,
                "search complete"
            );
        }
        best
    }

    /// Score of a terminal position, or `None` if play continues.
    fn terminal_score(&self, board: &Board, depth: i32) -> Option<i32> {
        if board.winner(self.ai) {
            Some(WIN_SCORE - depth)
        } else if board.winner(self.human) {
            Some(depth - WIN_SCORE)
        } else if board.is_full() {
            Some(DRAW_SCORE)
        } else {
            None
        }
    }

    /// Alpha-beta minimax over `board`, restoring every cell it touches.
    fn minimax(
        &mut self,
        board: &mut Board,
        depth: i32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if let Some(score) = self.terminal_score(board, depth) {
            return score;
        }

        if maximizing {
            let mut best = i32::MIN;
            for mv in board.empty_cells() {
                board.place(mv.row, mv.col, self.ai);
                let score = self.minimax(board, depth + 1, false, alpha, beta);
                board.clear(mv.row, mv.col);

                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in board.empty_cells() {
                board.place(mv.row, mv.col, self.human);
                let score = self.minimax(board, depth + 1, true, alpha, beta);
                board.clear(mv.row, mv.col);

                best = best.min(score);
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}
