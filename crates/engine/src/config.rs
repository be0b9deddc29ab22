//! Session configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Session host configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Piece source seed
    pub seed: u32,
    /// Append-only JSON-lines event log
    pub event_log_path: Option<PathBuf>,
    /// Start a game immediately instead of waiting for a start command
    pub autostart: bool,
    /// Read commands as stdin lines even when attached to a terminal
    pub headless: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            event_log_path: None,
            autostart: false,
            headless: false,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    ///
    /// - `TETRIS_SEED`: u32 seed (default: derived from the wall clock)
    /// - `TETRIS_EVENT_LOG_PATH`: JSONL event log path (default: none)
    /// - `TETRIS_AUTOSTART`: `1` or `true` to start on launch
    /// - `TETRIS_HEADLESS`: `1` or `true` to read stdin lines
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let event_log_path = lookup("TETRIS_EVENT_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            seed,
            event_log_path,
            autostart: lookup("TETRIS_AUTOSTART").is_some_and(|v| is_truthy(&v)),
            headless: lookup("TETRIS_HEADLESS").is_some_and(|v| is_truthy(&v)),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true")
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
