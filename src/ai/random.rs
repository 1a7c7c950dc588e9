use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::SearchError;
use crate::game::{Board, Move, Piece};

use super::agent::Agent;

/// An agent that selects uniformly at random from legal moves.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible agent for tests and benchmark matches.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, board: &Board, _piece: Piece) -> Result<Move, SearchError> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        let idx = self.rng.random_range(0..moves.len());
        Ok(moves[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}
