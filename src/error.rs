use std::path::PathBuf;

use crate::game::Piece;

/// Errors raised by board construction and move application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board sides must be between 4 and 64, got {rows} rows x {cols} columns")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("column {column} is out of range (board has {cols} columns)")]
    InvalidColumn { column: usize, cols: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("cannot drop an empty piece")]
    EmptyPiece,
}

/// Errors that can occur while searching for a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("search depth must be >= 0, got {0}")]
    NegativeDepth(i32),

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("search worker for column {column} panicked")]
    WorkerPanicked { column: usize },

    #[error("board error: {0}")]
    Board(#[from] BoardError),
}

/// Errors that can occur while an arena game is running.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("board error: {0}")]
    Board(#[from] BoardError),

    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("{player} failed to produce a legal move after {attempts} attempts")]
    RetriesExhausted { player: String, attempts: u32 },

    #[error("no player assigned to {}", .0.name())]
    UnassignedPiece(Piece),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::ColumnFull { column: 0 };
        assert_eq!(err.to_string(), "column 0 is full");

        let err = BoardError::InvalidDimensions { rows: 3, cols: 7 };
        assert_eq!(
            err.to_string(),
            "board sides must be between 4 and 64, got 3 rows x 7 columns"
        );
    }

    #[test]
    fn test_search_error_from_board_error() {
        let err: SearchError = BoardError::InvalidColumn { column: 9, cols: 7 }.into();
        assert_eq!(
            err.to_string(),
            "board error: column 9 is out of range (board has 7 columns)"
        );
    }

    #[test]
    fn test_arena_error_display() {
        let err = ArenaError::RetriesExhausted {
            player: "Computer".to_string(),
            attempts: 3,
        };
        assert_eq!(
            err.to_string(),
            "Computer failed to produce a legal move after 3 attempts"
        );
        let err = ArenaError::UnassignedPiece(Piece::PlayerB);
        assert_eq!(err.to_string(), "no player assigned to PlayerB");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("search.depth must be >= 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: search.depth must be >= 0"
        );
    }
}
