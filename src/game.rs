//! Interactive text game.
//!
//! A [`Session`] runs the human-vs-computer loop over any line-based input
//! and any writer, so the same code serves the terminal and the tests:
//!
//! - difficulty menu (skipped when configured up front)
//! - human turn with re-prompting on bad input
//! - computer turn through the configured [`MoveSelector`]
//! - result screen and replay prompt
//!
//! End of input at any prompt ends the session quietly.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::board::{Board, GameStatus, Mark, Move};
use crate::constants::{N, THINK_DELAY_MS};
use crate::strategy::{Difficulty, MoveSelector};

/// ANSI sequence that clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Session settings, usually filled in from the command line.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Fixed difficulty; `None` asks the player before each game
    pub difficulty: Option<Difficulty>,
    /// Seed for the random source; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Clear the terminal before redrawing the board
    pub clear_screen: bool,
    /// Pause before the computer moves
    pub think_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: None,
            seed: None,
            clear_screen: true,
            think_delay: Duration::from_millis(THINK_DELAY_MS),
        }
    }
}

/// Result of reading the human's move.
enum HumanInput {
    Move(Move),
    Eof,
}

/// One interactive session, possibly spanning several games.
pub struct Session<R, W> {
    input: R,
    output: W,
    config: SessionConfig,
    rng: fastrand::Rng,
    board: Board,
    human: Mark,
    ai: Mark,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            input,
            output,
            config,
            rng,
            board: Board::new(),
            human: Mark::Human,
            ai: Mark::Ai,
        }
    }

    /// The board of the current (or last finished) game.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Consume the session and hand back the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Play games until the player declines a rematch or input runs out.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.board = Board::new();
            writeln!(self.output, "Welcome to Tic-Tac-Toe!")?;
            writeln!(
                self.output,
                "You are '{}' and the AI is '{}'",
                self.human.symbol(),
                self.ai.symbol()
            )?;

            let Some(difficulty) = self.choose_difficulty()? else {
                return Ok(());
            };
            info!(%difficulty, "starting game");

            let Some(status) = self.play_game(difficulty)? else {
                return Ok(());
            };
            info!(?status, moves = self.board.move_count(), "game over");

            self.redraw()?;
            writeln!(self.output, "{}", result_message(status))?;

            let answer = self.prompt("\nDo you want to play again? (y/n): ")?;
            if !matches!(answer.as_deref().map(str::trim), Some("y" | "Y")) {
                writeln!(self.output, "Thanks for playing!")?;
                return Ok(());
            }
        }
    }

    /// Use the configured difficulty or ask for one. `None` on end of input.
    fn choose_difficulty(&mut self) -> Result<Option<Difficulty>> {
        if let Some(difficulty) = self.config.difficulty {
            writeln!(self.output, "Difficulty set to {difficulty}")?;
            return Ok(Some(difficulty));
        }

        writeln!(self.output, "\nSelect difficulty level:")?;
        writeln!(self.output, "1. Easy")?;
        writeln!(self.output, "2. Medium")?;
        writeln!(self.output, "3. Hard (default)")?;
        let Some(choice) = self.prompt("Enter your choice (1-3): ")? else {
            return Ok(None);
        };

        let difficulty = Difficulty::from_choice(&choice);
        writeln!(self.output, "Difficulty set to {difficulty}")?;
        Ok(Some(difficulty))
    }

    /// Alternate turns, human first, until the game ends.
    fn play_game(&mut self, difficulty: Difficulty) -> Result<Option<GameStatus>> {
        let mut selector = difficulty.selector();
        let mut to_move = self.human;

        loop {
            self.redraw()?;

            if to_move == self.human {
                match self.read_human_move()? {
                    HumanInput::Move(mv) => debug!(row = mv.row, col = mv.col, "human move"),
                    HumanInput::Eof => return Ok(None),
                }
            } else {
                self.computer_move(selector.as_mut())?;
            }

            let status = self.board.status(self.human, self.ai);
            if status.is_over() {
                return Ok(Some(status));
            }
            to_move = to_move.opponent();
        }
    }

    /// Prompt until the human enters a legal move, then place it.
    fn read_human_move(&mut self) -> Result<HumanInput> {
        writeln!(self.output, "Your turn (row, col): ")?;
        loop {
            let Some(row) = self.prompt("Enter row (1-3): ")? else {
                return Ok(HumanInput::Eof);
            };
            let Some(col) = self.prompt("Enter column (1-3): ")? else {
                return Ok(HumanInput::Eof);
            };

            let (Ok(row), Ok(col)) = (row.trim().parse::<i64>(), col.trim().parse::<i64>())
            else {
                writeln!(self.output, "Please enter numbers only!")?;
                continue;
            };

            let range = 1..=N as i64;
            if !range.contains(&row) || !range.contains(&col) {
                writeln!(
                    self.output,
                    "Invalid input! Row and column must be between 1 and 3."
                )?;
                continue;
            }

            let mv = Move::new((row - 1) as usize, (col - 1) as usize);
            if self.board.place(mv.row, mv.col, self.human) {
                return Ok(HumanInput::Move(mv));
            }
            writeln!(self.output, "That cell is already occupied! Try again.")?;
        }
    }

    fn computer_move(&mut self, selector: &mut dyn MoveSelector) -> Result<()> {
        writeln!(self.output, "AI is thinking...")?;
        self.output.flush()?;
        if !self.config.think_delay.is_zero() {
            thread::sleep(self.config.think_delay);
        }

        if let Some(mv) = selector.select(&mut self.board, self.ai, self.human, &mut self.rng) {
            assert!(
                self.board.place(mv.row, mv.col, self.ai),
                "selector chose occupied cell {mv}"
            );
            debug!(row = mv.row, col = mv.col, "computer move");
        }
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        if self.config.clear_screen {
            write!(self.output, "{CLEAR_SCREEN}")?;
        }
        write!(self.output, "\n\n{}\n", self.board)?;
        Ok(())
    }

    /// Print `text` and read one line. `None` on end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Line shown when a game ends.
pub fn result_message(status: GameStatus) -> &'static str {
    match status {
        GameStatus::HumanWins => "You win!",
        GameStatus::AiWins => "AI wins!",
        GameStatus::Draw => "It's a tie!",
        GameStatus::Ongoing => "Game in progress",
    }
}

/// Play one computer-vs-computer game from the empty board.
///
/// `x` moves first with the `Human` mark, `o` answers with the `Ai` mark.
/// Returns the final board and status.
pub fn self_play(x: Difficulty, o: Difficulty, rng: &mut fastrand::Rng) -> (Board, GameStatus) {
    let mut board = Board::new();
    let mut x_selector = x.selector();
    let mut o_selector = o.selector();
    let mut to_move = Mark::Human;

    loop {
        let status = board.status(Mark::Human, Mark::Ai);
        if status.is_over() {
            return (board, status);
        }

        let selector = if to_move == Mark::Human {
            x_selector.as_mut()
        } else {
            o_selector.as_mut()
        };
        let Some(mv) = selector.select(&mut board, to_move, to_move.opponent(), rng) else {
            return (board, board.status(Mark::Human, Mark::Ai));
        };
        assert!(
            board.place(mv.row, mv.col, to_move),
            "selector chose occupied cell {mv}"
        );
        debug!(mark = ?to_move, row = mv.row, col = mv.col, "self-play move");
        to_move = to_move.opponent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn quiet(difficulty: Option<Difficulty>) -> SessionConfig {
        SessionConfig {
            difficulty,
            seed: Some(1),
            clear_screen: false,
            think_delay: Duration::ZERO,
        }
    }

    fn run_session(input: &str, config: SessionConfig) -> (String, Board) {
        let mut session = Session::new(Cursor::new(input.to_string()), Vec::new(), config);
        session.run().unwrap();
        let board = *session.board();
        let out = String::from_utf8(session.into_output()).unwrap();
        (out, board)
    }

    #[test]
    fn test_eof_at_menu_ends_quietly() {
        let (out, board) = run_session("", quiet(None));
        assert!(out.contains("Welcome to Tic-Tac-Toe!"));
        assert!(out.contains("Select difficulty level:"));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_invalid_difficulty_defaults_to_hard() {
        let (out, _) = run_session("9\n", quiet(None));
        assert!(!out.contains("Invalid difficulty level"));
        assert!(out.contains("Difficulty set to hard"));
    }

    #[test]
    fn test_configured_difficulty_skips_menu() {
        let (out, _) = run_session("", quiet(Some(Difficulty::Medium)));
        assert!(!out.contains("Select difficulty level:"));
        assert!(out.contains("Difficulty set to medium"));
    }

    #[test]
    fn test_bad_input_reprompts() {
        let (out, board) = run_session("3\nabc\n1\n5\n1\n", quiet(None));
        assert!(out.contains("Please enter numbers only!"));
        assert!(out.contains("Invalid input! Row and column must be between 1 and 3."));
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn test_occupied_cell_reprompts() {
        // The computer answers a corner with the center.
        let (out, board) = run_session("3\n1\n1\n2\n2\n", quiet(None));
        assert!(out.contains("AI is thinking..."));
        assert!(out.contains("That cell is already occupied! Try again."));
        assert_eq!(board.get(0, 0), Mark::Human);
        assert_eq!(board.get(1, 1), Mark::Ai);
    }

    #[test]
    fn test_computer_punishes_blunder() {
        // X (0,0), O (1,1), X (2,2), O (0,1), X (1,0) leaves column 1 open.
        let (out, board) = run_session("3\n1\n1\n3\n3\n2\n1\nn\n", quiet(None));
        assert_eq!(board.get(2, 1), Mark::Ai);
        assert_eq!(board.status(Mark::Human, Mark::Ai), GameStatus::AiWins);
        assert!(out.contains("AI wins!"));
        assert!(out.contains("Thanks for playing!"));
    }

    #[test]
    fn test_replay_starts_fresh_board() {
        let (out, board) = run_session("3\n1\n1\n3\n3\n2\n1\ny\n", quiet(None));
        assert_eq!(out.matches("Welcome to Tic-Tac-Toe!").count(), 2);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_clear_screen_written_when_enabled() {
        let mut config = quiet(Some(Difficulty::Hard));
        config.clear_screen = true;
        let (out, _) = run_session("", config);
        assert!(out.contains(CLEAR_SCREEN));
    }

    /// Always answers with the top-left cell, occupied or not.
    struct TopLeft;

    impl MoveSelector for TopLeft {
        fn select(
            &mut self,
            _board: &mut Board,
            _ai: Mark,
            _human: Mark,
            _rng: &mut fastrand::Rng,
        ) -> Option<Move> {
            Some(Move::new(0, 0))
        }
    }

    #[test]
    #[should_panic(expected = "occupied cell")]
    fn test_computer_move_rejects_occupied_cell() {
        let mut session = Session::new(Cursor::new(String::new()), Vec::new(), quiet(None));
        session.board.place(0, 0, Mark::Human);
        session.computer_move(&mut TopLeft).unwrap();
    }

    #[test]
    fn test_computer_move_places_selected_cell() {
        let mut session = Session::new(Cursor::new(String::new()), Vec::new(), quiet(None));
        session.computer_move(&mut TopLeft).unwrap();
        assert_eq!(session.board().get(0, 0), Mark::Ai);
    }

    #[test]
    fn test_result_messages() {
        assert_eq!(result_message(GameStatus::HumanWins), "You win!");
        assert_eq!(result_message(GameStatus::AiWins), "AI wins!");
        assert_eq!(result_message(GameStatus::Draw), "It's a tie!");
    }

    #[test]
    fn test_self_play_hard_draws() {
        let mut rng = fastrand::Rng::with_seed(0);
        let (board, status) = self_play(Difficulty::Hard, Difficulty::Hard, &mut rng);
        assert_eq!(status, GameStatus::Draw);
        assert!(board.is_full());
    }
}
