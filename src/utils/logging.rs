//! Log file setup.
//!
//! The terminal belongs to the UI, so tracing output goes to
//! `~/.arcade/arcade.log`. `ARCADE_LOG` overrides the level.

use crate::error::{ArcadeError, Result};
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

pub const LOG_FILE: &str = "arcade.log";
pub const LOG_ENV: &str = "ARCADE_LOG";

/// Parse a level name, falling back to `INFO`.
pub fn parse_level(raw: Option<&str>) -> Level {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        _ => Level::INFO,
    }
}

fn open_log(dir: &Path) -> Result<File> {
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;
    Ok(file)
}

/// Install the global subscriber writing to `dir/arcade.log`.
pub fn init(dir: &Path) -> Result<()> {
    let file = open_log(dir)?;
    let level = parse_level(std::env::var(LOG_ENV).ok().as_deref());
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| ArcadeError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(None), Level::INFO);
        assert_eq!(parse_level(Some("DEBUG")), Level::DEBUG);
        assert_eq!(parse_level(Some(" warn ")), Level::WARN);
        assert_eq!(parse_level(Some("nonsense")), Level::INFO);
    }

    #[test]
    fn test_open_log_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs");
        open_log(&nested).unwrap();
        assert!(nested.join(LOG_FILE).exists());
    }
}
