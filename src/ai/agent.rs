use crate::error::SearchError;
use crate::game::{Board, Move, Piece};

use super::minimax::Search;

/// Canonical look-ahead used by the automated opponent.
pub const DEFAULT_DEPTH: i32 = 3;

/// Universal interface for anything that picks moves.
pub trait Agent {
    /// Select a column for `piece` to play on `board`.
    fn select_move(&mut self, board: &Board, piece: Piece) -> Result<Move, SearchError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Minimax opponent. Searches root moves in parallel unless told otherwise.
#[derive(Debug, Clone)]
pub struct MinimaxAgent {
    depth: i32,
    concurrent: bool,
    search: Search,
}

impl MinimaxAgent {
    pub fn new(depth: i32) -> Self {
        MinimaxAgent {
            depth,
            concurrent: true,
            search: Search::new(),
        }
    }

    /// Use the single-threaded root search.
    pub fn sequential(mut self) -> Self {
        self.concurrent = false;
        self
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn is_concurrent(&self) -> bool {
        self.concurrent
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, board: &Board, piece: Piece) -> Result<Move, SearchError> {
        if self.concurrent {
            self.search.concurrent_find_best_move(board, piece, self.depth)
        } else {
            self.search.find_best_move(board, piece, self.depth)
        }
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
