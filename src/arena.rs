//! Headless game loop: two seated agents alternate moves on a board until
//! the game is won or drawn.

use log::{info, warn};

use crate::ai::Agent;
use crate::error::ArenaError;
use crate::game::{Board, GameStatus, Move, Piece, Player};

/// A player together with the agent that chooses its moves.
pub struct Seat {
    pub player: Player,
    pub agent: Box<dyn Agent>,
}

impl Seat {
    pub fn new(player: Player, agent: Box<dyn Agent>) -> Self {
        Seat { player, agent }
    }

    /// Name, agent and controller, e.g. `Player (Random, human)`.
    pub fn label(&self) -> String {
        let controller = if self.player.is_human { "human" } else { "engine" };
        format!(
            "{} ({}, {})",
            self.player.name,
            self.agent.name(),
            controller
        )
    }
}

/// Result of a finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub status: GameStatus,
    pub moves: Vec<Move>,
    pub final_board: Board,
    pub players: Vec<Player>,
}

impl GameRecord {
    /// The winning player, if the game was not drawn.
    pub fn winner(&self) -> Option<&Player> {
        match self.status {
            GameStatus::Won(piece) => self.players.iter().find(|p| p.piece == piece),
            _ => None,
        }
    }
}

/// Runs one game between two seats.
pub struct Arena {
    board: Board,
    seats: Vec<Seat>,
    max_retries: u32,
}

impl Arena {
    /// Seat two players on `board`. Between them they must hold both pieces.
    pub fn new(
        board: Board,
        first: Seat,
        second: Seat,
        max_retries: u32,
    ) -> Result<Self, ArenaError> {
        for piece in [Piece::PlayerA, Piece::PlayerB] {
            if first.player.piece != piece && second.player.piece != piece {
                return Err(ArenaError::UnassignedPiece(piece));
            }
        }
        Ok(Arena {
            board,
            seats: vec![first, second],
            max_retries: max_retries.max(1),
        })
    }

    /// Play until the board is terminal.
    pub fn play(mut self) -> Result<GameRecord, ArenaError> {
        info!(
            "game start: {} vs {} on {}x{}",
            self.seats[0].label(),
            self.seats[1].label(),
            self.board.rows(),
            self.board.cols()
        );

        let mut moves = Vec::new();
        while !self.board.is_game_over() {
            let piece = self.board.next_to_move();
            let seat = self
                .seats
                .iter_mut()
                .find(|seat| seat.player.piece == piece)
                .ok_or(ArenaError::UnassignedPiece(piece))?;

            let (board, mv) = take_turn(&self.board, seat, self.max_retries)?;
            let count = seat.player.record_move();
            info!("{} plays column {} (move {})", seat.player.name, mv, count);
            moves.push(mv);
            self.board = board;
        }

        let status = self.board.status();
        match status {
            GameStatus::Won(piece) => info!(
                "game over after {} moves: {} wins",
                moves.len(),
                piece.name()
            ),
            _ => info!("game over after {} moves: draw", moves.len()),
        }

        Ok(GameRecord {
            status,
            moves,
            final_board: self.board,
            players: self.seats.into_iter().map(|seat| seat.player).collect(),
        })
    }
}

/// Ask the seat's agent for a move, re-asking up to `max_retries` times when
/// the board rejects it.
fn take_turn(
    board: &Board,
    seat: &mut Seat,
    max_retries: u32,
) -> Result<(Board, Move), ArenaError> {
    let piece = seat.player.piece;
    for attempt in 1..=max_retries {
        let mv = seat.agent.select_move(board, piece)?;
        match board.apply_move(piece, mv) {
            Ok(next) => return Ok((next, mv)),
            Err(err) => warn!(
                "{} proposed column {} (attempt {}/{}): {}",
                seat.player.name, mv, attempt, max_retries, err
            ),
        }
    }
    Err(ArenaError::RetriesExhausted {
        player: seat.player.name.clone(),
        attempts: max_retries,
    })
}
