//! Tic-tac-toe board state.
//!
//! The board is a fixed 3x3 grid of [`Mark`]s and is the entire game state:
//! no move history is kept. Coordinates are zero-based `(row, col)` pairs.
//! Indexing outside the grid is a caller bug and panics.

use std::fmt;
use std::str::FromStr;

use crate::constants::{CELLS, N, SYMBOL_AI, SYMBOL_EMPTY, SYMBOL_HUMAN};

/// Contents of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    Human,
    Ai,
}

impl Mark {
    /// Character used when rendering this mark.
    pub fn symbol(self) -> char {
        match self {
            Mark::Empty => SYMBOL_EMPTY,
            Mark::Human => SYMBOL_HUMAN,
            Mark::Ai => SYMBOL_AI,
        }
    }

    /// The other player's mark. `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Mark {
        match self {
            Mark::Human => Mark::Ai,
            Mark::Ai => Mark::Human,
            Mark::Empty => Mark::Empty,
        }
    }
}

/// A board coordinate, both components in `[0, N)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        assert!(row < N && col < N, "move ({row}, {col}) is off the board");
        Self { row, col }
    }
}

impl fmt::Display for Move {
    /// Formats the move one-based, the way players type it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, column {}", self.row + 1, self.col + 1)
    }
}

/// Outcome of a position from the driving loop's point of view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    HumanWins,
    AiWins,
    Draw,
    Ongoing,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// The eight winning lines: three rows, three columns, two diagonals.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A 3x3 tic-tac-toe board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Mark; N]; N],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: usize, col: usize) -> Mark {
        self.cells[row][col]
    }

    /// Place `mark` on an empty cell.
    ///
    /// Returns `false` and leaves the board untouched if the cell is taken.
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> bool {
        assert_ne!(mark, Mark::Empty, "cannot place an empty mark");
        let cell = &mut self.cells[row][col];
        if *cell != Mark::Empty {
            return false;
        }
        *cell = mark;
        true
    }

    /// Reset a cell to empty. Used by the search to undo scratch moves.
    pub fn clear(&mut self, row: usize, col: usize) {
        self.cells[row][col] = Mark::Empty;
    }

    /// Whether `mark` fills a whole row, column, or diagonal.
    pub fn winner(&self, mark: Mark) -> bool {
        if mark == Mark::Empty {
            return false;
        }
        LINES
            .iter()
            .any(|line| line.iter().all(|&(r, c)| self.cells[r][c] == mark))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&m| m != Mark::Empty)
    }

    /// All empty coordinates in row-major order.
    ///
    /// The order is relied upon by the search for its tie-break.
    pub fn empty_cells(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(CELLS);
        for row in 0..N {
            for col in 0..N {
                if self.cells[row][col] == Mark::Empty {
                    moves.push(Move { row, col });
                }
            }
        }
        moves
    }

    /// Number of non-empty cells, i.e. moves played so far.
    pub fn move_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&m| m != Mark::Empty)
            .count()
    }

    /// Combine the terminal checks into a single status.
    ///
    /// A human win is reported before an AI win, and either before a draw.
    pub fn status(&self, human: Mark, ai: Mark) -> GameStatus {
        if self.winner(human) {
            GameStatus::HumanWins
        } else if self.winner(ai) {
            GameStatus::AiWins
        } else if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing
        }
    }
}

/// Error returned when parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    /// Input did not contain exactly three rows
    RowCount(usize),
    /// A row did not contain exactly three cells
    RowLength { row: usize, len: usize },
    /// A cell character was not recognised
    BadCell { row: usize, ch: char },
}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseBoardError::RowCount(n) => write!(f, "expected {N} rows, got {n}"),
            ParseBoardError::RowLength { row, len } => {
                write!(f, "row {row}: expected {N} cells, got {len}")
            }
            ParseBoardError::BadCell { row, ch } => {
                write!(f, "row {row}: unexpected cell character {ch:?}")
            }
        }
    }
}

impl std::error::Error for ParseBoardError {}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parse rows separated by `/` or newlines, e.g. `"OX./XOX/..."`.
    ///
    /// `X` is the human, `O` the computer; `.`, `_` and space are empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .split(['/', '\n'])
            .map(|r| r.trim_end_matches('\r'))
            .filter(|r| !r.is_empty())
            .collect();
        if rows.len() != N {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut board = Board::new();
        for (row, text) in rows.iter().enumerate() {
            let chars: Vec<char> = text.chars().collect();
            if chars.len() != N {
                return Err(ParseBoardError::RowLength {
                    row,
                    len: chars.len(),
                });
            }
            for (col, &ch) in chars.iter().enumerate() {
                board.cells[row][col] = match ch.to_ascii_uppercase() {
                    'X' => Mark::Human,
                    'O' => Mark::Ai,
                    '.' | '_' | ' ' => Mark::Empty,
                    _ => return Err(ParseBoardError::BadCell { row, ch }),
                };
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    1   2   3")?;
        writeln!(f, "  -------------")?;
        for (i, row) in self.cells.iter().enumerate() {
            write!(f, "{} |", i + 1)?;
            for mark in row {
                write!(f, " {} |", mark.symbol())?;
            }
            writeln!(f)?;
            writeln!(f, "  -------------")?;
        }
        Ok(())
    }
}
