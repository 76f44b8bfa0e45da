//! Tictactoe-Rust: Tic-Tac-Toe with a minimax opponent.
//!
//! The computer searches the whole game tree with alpha-beta pruning.
//! Lower difficulties sometimes swap the searched move for a random one.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, scores and difficulty tuning
//! - [`board`] - Board state, win/draw detection, parsing and rendering
//! - [`search`] - Minimax with alpha-beta pruning
//! - [`strategy`] - Difficulty levels and move-selection policies
//! - [`game`] - Interactive session loop and self-play
//!
//! ## Example
//!
//! ```
//! use tictactoe_rust::board::{Board, Mark, Move};
//! use tictactoe_rust::strategy::{Difficulty, select_move};
//!
//! let mut board: Board = "XX./.O./O..".parse().unwrap();
//! let mut rng = fastrand::Rng::with_seed(0);
//!
//! let mv = select_move(&mut board, Mark::Ai, Mark::Human, Difficulty::Hard, &mut rng);
//! assert_eq!(mv, Some(Move::new(0, 2)));
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod search;
pub mod strategy;
