//! Tracing subscriber for the board.
//!
//! The terminal belongs to the TUI, so events go to
//! `<data_dir>/trivia-board/trivia-board.log` instead of stderr.
//!
//! Filter priority: `TRIVIA_BOARD_LOG`, then `RUST_LOG`, then `--verbose`
//! (debug) or the default (info).

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const LOG_ENV: &str = "TRIVIA_BOARD_LOG";

pub fn default_level(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::INFO }
}

pub fn log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trivia-board")
        .join("trivia-board.log")
}

/// Install the global subscriber. Returns the log file path, or `None` when
/// the file could not be opened and logging stays off.
pub fn init(verbose: bool) -> Option<PathBuf> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_env_filter(verbose))
        .with(fmt_layer)
        .try_init()
        .ok()?;
    Some(path)
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    select_env_filter(
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        verbose,
    )
}

/// First directive string that parses wins; otherwise fall back to the
/// verbosity level.
fn select_env_filter(
    app_directives: Option<String>,
    rust_log: Option<String>,
    verbose: bool,
) -> EnvFilter {
    [app_directives, rust_log]
        .into_iter()
        .flatten()
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level(verbose).as_str()))
}
