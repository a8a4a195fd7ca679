//! Configuration for the order board.
//!
//! Locates the board's state directory and loads board settings.
//!
//! # Storage Structure
//!
//! ```text
//! ~/.order-board/
//! ├── logs/         # order-board.log
//! └── config/       # board.json
//! ```
//!
//! Orders themselves are never written to disk.
//!
//! # Environment Variables
//!
//! - `ORDER_BOARD_STATE_DIR`: Override the base state directory
//! - `ORDER_BOARD_LOG_DIR`: Override the log directory
//! - `ORDER_BOARD_CONFIG_DIR`: Override the config directory
//! - `ORDER_BOARD_TICK_MS`: Override the event poll interval

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "ORDER_BOARD_STATE_DIR";

/// Environment variable for custom log directory.
pub const LOG_DIR_ENV: &str = "ORDER_BOARD_LOG_DIR";

/// Environment variable for custom config directory.
pub const CONFIG_DIR_ENV: &str = "ORDER_BOARD_CONFIG_DIR";

/// Environment variable for the event poll interval in milliseconds.
pub const TICK_MS_ENV: &str = "ORDER_BOARD_TICK_MS";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".order-board";

const LOGS_SUBDIR: &str = "logs";
const CONFIG_SUBDIR: &str = "config";

static STATE_DIR_CACHE: OnceLock<PathBuf> = OnceLock::new();

/// Get the order board state directory.
///
/// The state directory is determined by:
/// 1. `ORDER_BOARD_STATE_DIR` environment variable if set
/// 2. `~/.order-board` if home directory is available
/// 3. `.order-board` in current directory as fallback
pub fn state_dir() -> PathBuf {
    STATE_DIR_CACHE
        .get_or_init(|| {
            std::env::var(STATE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    dirs::home_dir()
                        .map(|h| h.join(DEFAULT_STATE_DIR))
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
                })
        })
        .clone()
}

/// Get the logs directory under a state directory.
///
/// `ORDER_BOARD_LOG_DIR` takes precedence.
pub fn logs_dir(state_dir: &Path) -> PathBuf {
    std::env::var(LOG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir.join(LOGS_SUBDIR))
}

/// Get the config directory under a state directory.
///
/// `ORDER_BOARD_CONFIG_DIR` takes precedence.
pub fn config_dir(state_dir: &Path) -> PathBuf {
    std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir.join(CONFIG_SUBDIR))
}

/// Get the board config file path.
pub fn config_file(state_dir: &Path) -> PathBuf {
    config_dir(state_dir).join("board.json")
}

/// Get the log file path.
pub fn log_file(state_dir: &Path) -> PathBuf {
    logs_dir(state_dir).join("order-board.log")
}

/// Ensure the logs and config directories exist.
///
/// # Errors
/// Returns an error if any directory cannot be created.
pub fn ensure_dirs(state_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(logs_dir(state_dir))?;
    fs::create_dir_all(config_dir(state_dir))?;
    Ok(())
}

/// Errors loading the board config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    /// Config file is not valid JSON for a board config.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk form of [`BoardConfig`]; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct BoardConfigFile {
    tick_ms: Option<u64>,
    seed_orders: Option<bool>,
}

/// Settings for the board client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// How long to wait for terminal input before redrawing.
    pub tick_rate: Duration,
    /// Whether to start with sample orders.
    pub seed_orders: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
            seed_orders: false,
        }
    }
}

impl BoardConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick rate.
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Sets whether sample orders are added on start.
    pub fn with_seed_orders(mut self, seed: bool) -> Self {
        self.seed_orders = seed;
        self
    }

    /// Loads the config file, using defaults for anything it leaves out.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        let file: BoardConfigFile = serde_json::from_str(&content)?;
        let mut config = Self::default();
        if let Some(ms) = file.tick_ms {
            config.tick_rate = Duration::from_millis(ms);
        }
        if let Some(seed) = file.seed_orders {
            config.seed_orders = seed;
        }
        Ok(config)
    }

    /// Applies `ORDER_BOARD_TICK_MS` from the environment.
    pub fn apply_env(self) -> Self {
        let value = std::env::var(TICK_MS_ENV).ok();
        self.apply_tick_override(value.as_deref())
    }

    /// Applies a tick override given as a string of milliseconds.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_tick_override(self, value: Option<&str>) -> Self {
        match value.map(str::parse::<u64>) {
            Some(Ok(ms)) => self.with_tick_rate(Duration::from_millis(ms)),
            Some(Err(e)) => {
                warn!(error = %e, "ignoring invalid {}", TICK_MS_ENV);
                self
            }
            None => self,
        }
    }
}
