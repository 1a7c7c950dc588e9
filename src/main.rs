use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use minimax_connect_four::ai::{Agent, MinimaxAgent, RandomAgent};
use minimax_connect_four::arena::{Arena, Seat};
use minimax_connect_four::config::{AppConfig, Opponent};
use minimax_connect_four::game::{GameStatus, Piece, Player};

/// Play Connect Four games against the minimax engine.
#[derive(Parser)]
#[command(name = "minimax-connect-four", about = "Connect Four minimax engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override search depth
    #[arg(long)]
    depth: Option<i32>,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Override the engine's opponent
    #[arg(long, value_enum)]
    opponent: Option<Opponent>,

    /// Seed for the random opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Search root moves on a single thread
    #[arg(long)]
    sequential: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(games) = cli.games {
        config.arena.games = games;
    }
    if let Some(opponent) = cli.opponent {
        config.arena.opponent = opponent;
    }
    if cli.seed.is_some() {
        config.arena.seed = cli.seed;
    }
    if cli.sequential {
        config.search.concurrent = false;
    }
    config.validate().context("validating configuration")?;

    let mut engine_wins = 0;
    let mut draws = 0;
    for game in 0..config.arena.games {
        // Alternate who opens so the engine plays both sides.
        let engine_piece = if game % 2 == 0 { Piece::PlayerA } else { Piece::PlayerB };
        let engine = Seat::new(
            Player::new("Computer", engine_piece, false),
            Box::new(engine_agent(&config)),
        );
        let opponent = Seat::new(
            Player::new("Opponent", engine_piece.opposite(), false),
            opponent_agent(&config, game as u64),
        );

        let board = config.starting_board()?;
        let record = Arena::new(board, engine, opponent, config.arena.max_retries)?
            .play()
            .with_context(|| format!("playing game {}", game + 1))?;

        println!("Game {} final board:\n{}", game + 1, record.final_board);
        match record.status {
            GameStatus::Won(piece) if piece == engine_piece => engine_wins += 1,
            GameStatus::Draw => draws += 1,
            _ => {}
        }
    }

    info!(
        "engine won {}/{} games ({} drawn)",
        engine_wins, config.arena.games, draws
    );
    Ok(())
}

fn engine_agent(config: &AppConfig) -> MinimaxAgent {
    let agent = MinimaxAgent::new(config.search.depth);
    if config.search.concurrent {
        agent
    } else {
        agent.sequential()
    }
}

fn opponent_agent(config: &AppConfig, game: u64) -> Box<dyn Agent> {
    match config.arena.opponent {
        Opponent::Minimax => Box::new(engine_agent(config)),
        Opponent::Random => match config.arena.seed {
            Some(seed) => Box::new(RandomAgent::with_seed(seed.wrapping_add(game))),
            None => Box::new(RandomAgent::new()),
        },
    }
}
