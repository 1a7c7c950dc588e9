//! Move selection: the segment heuristic, minimax search (sequential and
//! fanned out across threads), and the agents built on top of them.

mod agent;
mod heuristic;
mod minimax;
mod random;

pub use agent::{Agent, MinimaxAgent, DEFAULT_DEPTH};
pub use heuristic::{evaluate, Heuristic, SegmentHeuristic, SEGMENT_WEIGHTS};
pub use minimax::{
    concurrent_find_best_move, find_best_move, minimax, select_best, MoveScore, Search,
};
pub use random::RandomAgent;
