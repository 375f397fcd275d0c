//! High-score persistence.
//!
//! Each game keeps one integer under its own key in a string key/value
//! store. Unreadable values count as 0, and write failures never reach the
//! game loop.

use crate::utils::persistence::{load_json_at_or_default, save_json_at, save_path};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};

pub const SCORES_FILE: &str = "scores.json";

/// Minimal persistent string store.
pub trait ScoreStore: Debug {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Store backed by a JSON object on disk. The file is re-read before every
/// write so two running games do not clobber each other's keys.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.arcade/scores.json`.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::new(save_path(SCORES_FILE)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        load_json_at_or_default(&self.path)
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        let mut all = self.read_all();
        all.insert(key.to_string(), value.to_string());
        save_json_at(&self.path, &all)
    }
}

/// In-memory store, for tests and for running without a home directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Parse a stored score. Anything that is not a non-negative integer is 0.
pub fn parse_score(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0)
}

/// Best score for one game, read once and written only when beaten.
#[derive(Debug)]
pub struct HighScore {
    key: &'static str,
    best: u32,
    store: Box<dyn ScoreStore>,
}

impl HighScore {
    pub fn load(store: Box<dyn ScoreStore>, key: &'static str) -> Self {
        let best = parse_score(store.get(key).as_deref());
        tracing::debug!(key, best, "loaded high score");
        Self { key, best, store }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Offer a finished run's score. Returns true on a new best. The new
    /// best is kept in memory even if it cannot be written.
    pub fn submit(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if let Err(e) = self.store.set(self.key, &score.to_string()) {
            tracing::warn!(key = self.key, error = %e, "failed to save high score");
        }
        true
    }
}
