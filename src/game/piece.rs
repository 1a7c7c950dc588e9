use std::fmt;

/// Contents of a single board cell, doubling as the identity of a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Piece {
    #[default]
    Empty,
    PlayerA,
    PlayerB,
}

impl Piece {
    /// Get the other side. `Empty` maps to itself.
    pub fn opposite(self) -> Piece {
        match self {
            Piece::Empty => Piece::Empty,
            Piece::PlayerA => Piece::PlayerB,
            Piece::PlayerB => Piece::PlayerA,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    /// Single glyph used when printing a board
    pub fn glyph(self) -> char {
        match self {
            Piece::Empty => ' ',
            Piece::PlayerA => '+',
            Piece::PlayerB => '*',
        }
    }

    /// Get side name for display
    pub fn name(self) -> &'static str {
        match self {
            Piece::Empty => "Empty",
            Piece::PlayerA => "PlayerA",
            Piece::PlayerB => "PlayerB",
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A move is the column a piece is dropped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move(usize);

impl Move {
    pub fn new(column: usize) -> Self {
        Move(column)
    }

    pub fn column(self) -> usize {
        self.0
    }
}

impl From<usize> for Move {
    fn from(column: usize) -> Self {
        Move(column)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
