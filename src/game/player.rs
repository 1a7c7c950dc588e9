use super::Piece;

/// A participant in a game: who they are, which piece they drop, and how
/// many moves they have made so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub piece: Piece,
    pub is_human: bool,
    moves_made: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, piece: Piece, is_human: bool) -> Self {
        Player {
            name: name.into(),
            piece,
            is_human,
            moves_made: 0,
        }
    }

    /// Number of moves this player has made
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    /// Count one more move. Called by the game loop after the move lands.
    pub fn record_move(&mut self) -> u32 {
        self.moves_made += 1;
        self.moves_made
    }
}
