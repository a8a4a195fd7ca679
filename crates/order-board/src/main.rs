//! Order board entry point.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use order_board::cli::Cli;
use order_board::config::{self, BoardConfig};
use order_board::tui;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn main() {
    // Load .env.local if it exists (for ORDER_BOARD_* overrides)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let state_dir = cli.state_dir();
    config::ensure_dirs(&state_dir)?;
    init_logging(cli, &state_dir)?;

    let mut board = BoardConfig::load(&cli.config_file())?.apply_env();
    if let Some(ms) = cli.tick_ms {
        board = board.with_tick_rate(std::time::Duration::from_millis(ms));
    }
    if cli.seed {
        board = board.with_seed_orders(true);
    }
    info!(state_dir = %state_dir.display(), ?board, "starting order board");

    tui::run(&board)?;
    Ok(())
}

/// Logs go to a file; the terminal belongs to the board.
fn init_logging(cli: &Cli, state_dir: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config::log_file(state_dir))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}
