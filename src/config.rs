//! Runtime configuration read from `BLOCKFALL_*` environment variables.
//!
//! Every variable is optional; a missing or unparsable value keeps the default.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::Level;

use crate::core::{ProgressTrack, Rules};

pub const DEFAULT_HIGH_SCORE_FILE: &str = "blockfall-highscore.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seed for piece selection and double-score rolls
    pub seed: u32,
    pub high_score_path: PathBuf,
    /// Hold in the waiting phase until Enter is pressed
    pub welcome: bool,
    pub progress: Option<ProgressTrack>,
    /// Log file; `None` disables logging
    pub log_path: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: time_seed(),
            high_score_path: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
            welcome: true,
            progress: None,
            log_path: None,
            log_level: Level::INFO,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = get("BLOCKFALL_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed);

        let high_score_path = get("BLOCKFALL_HIGH_SCORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.high_score_path);

        let welcome = get("BLOCKFALL_WELCOME")
            .and_then(|s| parse_flag(&s))
            .unwrap_or(defaults.welcome);

        let progress = get("BLOCKFALL_PROGRESS").and_then(|s| parse_progress(&s));

        let log_path = get("BLOCKFALL_LOG_PATH").map(PathBuf::from);

        let log_level = get("BLOCKFALL_LOG")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.log_level);

        Self {
            seed,
            high_score_path,
            welcome,
            progress,
            log_path,
            log_level,
        }
    }

    /// Engine rules for this configuration.
    pub fn rules(&self) -> Rules {
        Rules {
            welcome_stage: self.welcome,
            progress: self.progress,
            ..Rules::default()
        }
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `<columns>x<rows_per_column>`, both positive.
pub fn parse_progress(s: &str) -> Option<ProgressTrack> {
    let (columns, rows) = s.to_ascii_lowercase().split_once('x').and_then(|(c, r)| {
        Some((c.trim().parse::<u32>().ok()?, r.trim().parse::<u32>().ok()?))
    })?;
    if columns == 0 || rows == 0 {
        return None;
    }
    Some(ProgressTrack::new(columns, rows))
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
