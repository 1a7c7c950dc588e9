use std::fmt;

use super::{Move, Piece};
use crate::error::BoardError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Length of a winning line, and of every scanned window.
pub const CONNECT: usize = 4;

/// Largest accepted row or column count. Keeps the cell count small and the
/// `i32` segment score sum far from overflow.
pub const MAX_DIMENSION: usize = 64;

/// Four contiguous cells read along one direction.
pub type Segment = [Piece; CONNECT];

/// The four scan directions used for win detection and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Bottom-left to top-right (/)
    DiagonalUp,
    /// Top-left to bottom-right (\)
    DiagonalDown,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalUp,
        Direction::DiagonalDown,
    ];

    /// Ranges of (column, row) start cells whose window stays on the board.
    fn starts(self, rows: usize, cols: usize) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let last = CONNECT - 1;
        match self {
            Direction::Horizontal => (0..cols - last, 0..rows),
            Direction::Vertical => (0..cols, 0..rows - last),
            Direction::DiagonalUp => (0..cols - last, 0..rows - last),
            Direction::DiagonalDown => (0..cols - last, last..rows),
        }
    }

    /// Cell `i` steps away from (col, row).
    fn offset(self, col: usize, row: usize, i: usize) -> (usize, usize) {
        match self {
            Direction::Horizontal => (col + i, row),
            Direction::Vertical => (col, row + i),
            Direction::DiagonalUp => (col + i, row + i),
            Direction::DiagonalDown => (col + i, row - i),
        }
    }
}

/// Where a game stands after the latest move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Piece),
    Draw,
}

/// Immutable Connect Four position.
///
/// Cells are addressed as (column, row) with row 0 at the bottom. Every
/// transition returns a new `Board`; an existing value is never modified,
/// which lets search workers own independent snapshots without locking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Column-major: cell (col, row) lives at `col * rows + row`.
    cells: Vec<Piece>,
    heights: Vec<usize>,
    turn: Piece,
}

impl Board {
    /// Create an empty board. Both dimensions must lie in 4..=64.
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        let valid = CONNECT..=MAX_DIMENSION;
        if !valid.contains(&rows) || !valid.contains(&cols) {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Board {
            rows,
            cols,
            cells: vec![Piece::Empty; rows * cols],
            heights: vec![0; cols],
            turn: Piece::Empty,
        })
    }

    /// The canonical 6x7 board
    pub fn standard() -> Self {
        Board {
            rows: ROWS,
            cols: COLS,
            cells: vec![Piece::Empty; ROWS * COLS],
            heights: vec![0; COLS],
            turn: Piece::Empty,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the piece at (col, row), or `None` if off the board.
    pub fn get(&self, col: usize, row: usize) -> Option<Piece> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[col * self.rows + row])
    }

    /// Number of pieces stacked in a column
    pub fn height(&self, col: usize) -> Option<usize> {
        self.heights.get(col).copied()
    }

    /// Total pieces placed so far
    pub fn piece_count(&self) -> usize {
        self.heights.iter().sum()
    }

    /// The piece that made the most recent move (`Empty` before any move).
    pub fn turn(&self) -> Piece {
        self.turn
    }

    /// The piece expected to move next. PlayerA opens the game.
    pub fn next_to_move(&self) -> Piece {
        match self.turn {
            Piece::Empty => Piece::PlayerA,
            last => last.opposite(),
        }
    }

    /// Columns that still have room, in ascending order. Empty on a full board.
    pub fn legal_moves(&self) -> Vec<Move> {
        (0..self.cols)
            .filter(|&col| self.heights[col] < self.rows)
            .map(Move::new)
            .collect()
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.heights
            .get(mv.column())
            .is_some_and(|&height| height < self.rows)
    }

    /// Drop `piece` into the column named by `mv`, returning the new position.
    pub fn apply_move(&self, piece: Piece, mv: Move) -> Result<Board, BoardError> {
        if piece.is_empty() {
            return Err(BoardError::EmptyPiece);
        }
        let col = mv.column();
        if col >= self.cols {
            return Err(BoardError::InvalidColumn {
                column: col,
                cols: self.cols,
            });
        }
        let row = self.heights[col];
        if row >= self.rows {
            return Err(BoardError::ColumnFull { column: col });
        }

        let mut next = self.clone();
        next.cells[col * self.rows + row] = piece;
        next.heights[col] += 1;
        next.turn = piece;
        Ok(next)
    }

    /// Apply a move for whichever side is due to play.
    pub fn play(&self, mv: Move) -> Result<Board, BoardError> {
        self.apply_move(self.next_to_move(), mv)
    }

    /// Play a sequence of columns, alternating sides from the current position.
    pub fn play_columns(&self, columns: &[usize]) -> Result<Board, BoardError> {
        columns
            .iter()
            .try_fold(self.clone(), |board, &col| board.play(Move::new(col)))
    }

    fn segment_at(&self, col: usize, row: usize, direction: Direction) -> Segment {
        std::array::from_fn(|i| {
            let (c, r) = direction.offset(col, row, i);
            self.cells[c * self.rows + r]
        })
    }

    /// Every 4-cell window along one direction.
    pub fn segments(&self, direction: Direction) -> impl Iterator<Item = Segment> + '_ {
        let (col_starts, row_starts) = direction.starts(self.rows, self.cols);
        col_starts.flat_map(move |col| {
            row_starts
                .clone()
                .map(move |row| self.segment_at(col, row, direction))
        })
    }

    /// Every 4-cell window on the board, all directions chained.
    pub fn all_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        Direction::ALL
            .into_iter()
            .flat_map(move |direction| self.segments(direction))
    }

    /// The piece owning a four-in-a-row, if any.
    pub fn winner(&self) -> Option<Piece> {
        self.all_segments()
            .find(|segment| is_connected(segment))
            .map(|segment| segment[0])
    }

    pub fn is_win(&self) -> bool {
        self.winner().is_some()
    }

    pub fn is_draw(&self) -> bool {
        self.legal_moves().is_empty() && !self.is_win()
    }

    pub fn is_game_over(&self) -> bool {
        self.is_win() || self.is_draw()
    }

    pub fn status(&self) -> GameStatus {
        if let Some(piece) = self.winner() {
            GameStatus::Won(piece)
        } else if self.legal_moves().is_empty() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// True when all four cells hold the same non-empty piece.
pub fn is_connected(segment: &Segment) -> bool {
    let first = segment[0];
    !first.is_empty() && segment.iter().all(|&piece| piece == first)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            write!(f, "|")?;
            for col in 0..self.cols {
                write!(f, "{}|", self.cells[col * self.rows + row])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
