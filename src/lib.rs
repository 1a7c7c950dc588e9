//! # Minimax Connect Four
//!
//! A Connect Four engine built around an immutable board and a depth-limited
//! minimax search. The root of the search can fan out across worker threads,
//! one per legal move, and still pick exactly the move the sequential search
//! would.
//!
//! ## Modules
//!
//! - [`game`] — Pieces, moves, the board with win/draw detection, players
//! - [`ai`] — Segment heuristic, minimax search, agents
//! - [`arena`] — Headless game loop between two agents
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
