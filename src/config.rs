use std::path::PathBuf;

use clap::builder::TypedValueParser;
use clap::Parser;

use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, DROP_INTERVAL_MS};

/// Settings the game session is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub drop_interval_ms: u64,
    /// Seed for the piece generator; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            drop_interval_ms: DROP_INTERVAL_MS,
            seed: None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "arena-tetris", version, about = "Falling-block puzzle game for the terminal")]
pub struct Cli {
    #[arg(
        long,
        env = "ARENA_WIDTH",
        default_value_t = BOARD_WIDTH,
        value_parser = clap::value_parser!(u16).range(4..=40).map(usize::from),
        help = "Board width in cells"
    )]
    pub width: usize,

    #[arg(
        long,
        env = "ARENA_HEIGHT",
        default_value_t = BOARD_HEIGHT,
        value_parser = clap::value_parser!(u16).range(4..=40).map(usize::from),
        help = "Board height in cells"
    )]
    pub height: usize,

    #[arg(
        long,
        env = "ARENA_DROP_INTERVAL_MS",
        default_value_t = DROP_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Milliseconds between automatic drops"
    )]
    pub drop_interval_ms: u64,

    #[arg(long, env = "ARENA_SEED", help = "Seed for the piece generator")]
    pub seed: Option<u64>,

    #[arg(long, env = "ARENA_NO_GRID", help = "Start with the grid overlay hidden")]
    pub no_grid: bool,

    #[arg(
        long,
        env = "ARENA_LOG_FILE",
        value_name = "FILE",
        value_hint = clap::ValueHint::FilePath,
        help = "Write log output to this file"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        env = "ARENA_LOG_LEVEL",
        default_value = "info",
        value_parser = ["error", "warn", "info", "debug", "trace"],
        help = "Maximum log level"
    )]
    pub log_level: String,
}

impl Cli {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            drop_interval_ms: self.drop_interval_ms,
            seed: self.seed,
        }
    }

    pub fn show_grid(&self) -> bool {
        !self.no_grid
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
