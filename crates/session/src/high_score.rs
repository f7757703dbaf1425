//! Locally persisted best score
//!
//! The file holds `{"highScore": n}`. It is read once when the store is
//! opened; a missing or unreadable file counts as zero.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::HighScoreError;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HighScoreFile {
    high_score: u32,
}

#[derive(Debug, Clone, Default)]
pub struct HighScoreStore {
    path: Option<PathBuf>,
    best: u32,
}

impl HighScoreStore {
    /// Store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the stored value from `path`
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<HighScoreFile>(&json) {
                Ok(file) => file.high_score,
                Err(e) => {
                    warn!("ignoring unreadable high score file {}: {}", path.display(), e);
                    0
                }
            },
            Err(_) => 0,
        };
        Self {
            path: Some(path),
            best,
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record `score`; persists and returns `true` when it beats the best.
    ///
    /// The in-memory value is updated even if writing the file fails.
    pub fn observe(&mut self, score: u32) -> Result<bool, HighScoreError> {
        if score <= self.best {
            return Ok(false);
        }
        self.best = score;
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<(), HighScoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&HighScoreFile {
            high_score: self.best,
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreStore::open(dir.path().join("best.json"));
        assert_eq!(store.best(), 0);
    }

    #[test]
    fn test_persists_only_improvements() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("best.json");

        let mut store = HighScoreStore::open(&path);
        assert!(store.observe(450).unwrap());
        assert!(!store.observe(300).unwrap());
        assert!(!store.observe(450).unwrap());

        let reopened = HighScoreStore::open(&path);
        assert_eq!(reopened.best(), 450);
    }

    #[test]
    fn test_corrupt_file_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(HighScoreStore::open(&path).best(), 0);
    }

    #[test]
    fn test_in_memory_store() {
        let mut store = HighScoreStore::in_memory();
        assert!(store.observe(10).unwrap());
        assert_eq!(store.best(), 10);
        assert!(store.path().is_none());
    }
}
