use std::path::Path;

use log::warn;

use crate::ai::DEFAULT_DEPTH;
use crate::error::ConfigError;
use crate::game::{Board, COLS, CONNECT, MAX_DIMENSION, ROWS};

/// Board dimensions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: ROWS,
            cols: COLS,
        }
    }
}

/// Minimax settings for the automated opponent.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: i32,
    /// Search root moves on parallel worker threads
    pub concurrent: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            concurrent: true,
        }
    }
}

/// Opponent faced by the minimax engine in arena games.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    Minimax,
    Random,
}

/// Arena game settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub games: usize,
    /// How many times an agent is re-asked after proposing an illegal move
    pub max_retries: u32,
    pub opponent: Opponent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            games: 1,
            max_retries: 3,
            opponent: Opponent::Minimax,
            seed: None,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub search: SearchConfig,
    pub arena: ArenaConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sides = CONNECT..=MAX_DIMENSION;
        if !sides.contains(&self.board.rows) || !sides.contains(&self.board.cols) {
            return Err(ConfigError::Validation(format!(
                "board.rows and board.cols must be in {CONNECT}..={MAX_DIMENSION}"
            )));
        }
        if self.search.depth < 0 {
            return Err(ConfigError::Validation(
                "search.depth must be >= 0".into(),
            ));
        }
        if self.arena.games == 0 {
            return Err(ConfigError::Validation(
                "arena.games must be >= 1".into(),
            ));
        }
        if self.arena.max_retries == 0 {
            return Err(ConfigError::Validation(
                "arena.max_retries must be >= 1".into(),
            ));
        }

        Ok(())
    }

    /// Build the empty starting board described by `[board]`.
    pub fn starting_board(&self) -> Result<Board, ConfigError> {
        Board::new(self.board.rows, self.board.cols)
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
