//! High-score persistence as a small JSON file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// File-backed best score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored best score. A missing file counts as 0.
    pub fn load(&self) -> Result<u32> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()))
            }
        };
        let record: HighScoreRecord = serde_json::from_str(&text)
            .with_context(|| format!("parsing high score file {}", self.path.display()))?;
        Ok(record.high_score)
    }

    /// Write `score` if it beats what is stored. Returns whether it was written.
    ///
    /// An unreadable existing file is overwritten.
    pub fn save(&self, score: u32) -> Result<bool> {
        let current = self.load().unwrap_or(0);
        if score <= current && self.path.exists() {
            return Ok(false);
        }

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating directory {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(true)
    }
}
