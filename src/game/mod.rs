//! Core Connect Four game logic: pieces and moves, the immutable board with
//! its win/draw detection, and the player record kept by the game loop.

mod board;
mod piece;
mod player;

pub use board::{
    is_connected, Board, Direction, GameStatus, Segment, COLS, CONNECT, MAX_DIMENSION, ROWS,
};
pub use piece::{Move, Piece};
pub use player::Player;
