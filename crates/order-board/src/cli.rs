//! Command-line interface definition using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{self, STATE_DIR_ENV};

/// Order Board - drag orders between kitchen columns in your terminal
#[derive(Parser, Debug)]
#[command(name = "order-board")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = STATE_DIR_ENV)]
    pub state_dir: Option<PathBuf>,

    /// Path to board config file (default: <state dir>/config/board.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Start with a few sample orders on the board
    #[arg(long)]
    pub seed: bool,

    /// Event poll interval in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,
}

impl Cli {
    /// Returns the state directory, falling back to the default location.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(config::state_dir)
    }

    /// Returns the config file path.
    pub fn config_file(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| config::config_file(&self.state_dir()))
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
