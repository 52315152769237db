//! tracing subscriber setup for the binaries.
//!
//! The interactive UI owns the terminal, so it logs to a file. One-shot
//! commands and the simulator log to stderr.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

/// Parses a level name, falling back to INFO for anything unrecognised.
pub fn parse_level(name: &str) -> Level {
    name.trim().parse().unwrap_or(Level::INFO)
}

/// Installs a subscriber writing plain-text lines to `path`.
pub fn init_file_logging(path: &Path, level: Level) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    // A subscriber may already be installed (tests, embedding); that's fine.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

pub fn init_stderr_logging(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}
