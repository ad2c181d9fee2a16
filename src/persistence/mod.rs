//! JSON save files
//!
//! Features:
//! - Generic load/save of serde documents with typed errors
//! - Write-to-temp then rename, so a crash never leaves a half-written save
//! - A file-backed [`HighScoreStore`] that degrades to 0 on any failure

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::highscores::{HighScoreStore, HighScores};

/// Errors from reading or writing a save file
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a JSON document. A missing file yields `Ok(None)`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistenceError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(serde_json::from_str(&text)?))
}

/// Write a JSON document, replacing any existing file
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec(value)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// High score kept in a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    scores: HighScores,
}

impl JsonFileStore {
    /// Open the store, reading the current high score (0 if unreadable)
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = match load_json::<HighScores>(&path) {
            Ok(Some(scores)) => {
                log::info!("Loaded high score {} from {}", scores.best, path.display());
                scores
            }
            Ok(None) => {
                log::info!("No save file at {}, starting fresh", path.display());
                HighScores::default()
            }
            Err(err) => {
                log::warn!("Could not read {}: {err}; high score reset to 0", path.display());
                HighScores::default()
            }
        };
        Self { path, scores }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        match save_json(&self.path, &self.scores) {
            Ok(()) => log::debug!("High score {} saved", self.scores.best),
            Err(err) => log::warn!("Could not write {}: {err}", self.path.display()),
        }
    }
}

impl HighScoreStore for JsonFileStore {
    fn high_score(&self) -> u32 {
        self.scores.best
    }

    fn report_score(&mut self, score: u32) -> bool {
        let improved = self.scores.submit(score);
        if improved {
            self.persist();
        }
        improved
    }

    fn clear(&mut self) {
        self.scores = HighScores::default();
        match fs::remove_file(&self.path) {
            Ok(()) => log::info!("Save data deleted"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => log::warn!("Could not delete {}: {err}", self.path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unique scratch path per test
    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "cats-dodge-dogs-test-{}-{name}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir.join("save.json")
    }

    #[test]
    fn test_missing_file_is_zero() {
        let store = JsonFileStore::open(scratch("missing"));
        assert_eq!(store.high_score(), 0);
    }

    #[test]
    fn test_report_persists_and_reloads() {
        let path = scratch("reload");
        let mut store = JsonFileStore::open(&path);
        assert!(store.report_score(7));
        assert!(!store.report_score(3));

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.high_score(), 7);
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"highscore":7}"#);
    }

    #[test]
    fn test_corrupt_file_is_zero() {
        let path = scratch("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            load_json::<HighScores>(&path),
            Err(PersistenceError::Json(_))
        ));
        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.high_score(), 0);
        assert!(store.report_score(1));
        assert_eq!(JsonFileStore::open(&path).high_score(), 1);
    }

    #[test]
    fn test_unwritable_path_is_not_fatal() {
        let blocker = scratch("blocked");
        fs::create_dir_all(blocker.parent().unwrap()).unwrap();
        fs::write(&blocker, "{}").unwrap();
        // A regular file standing where a directory should be
        let mut store = JsonFileStore::open(blocker.join("nested").join("save.json"));
        assert!(store.report_score(4));
        assert_eq!(store.high_score(), 4);
    }

    #[test]
    fn test_clear_removes_file() {
        let path = scratch("clear");
        let mut store = JsonFileStore::open(&path);
        store.report_score(2);
        assert!(path.exists());
        store.clear();
        assert!(!path.exists());
        assert_eq!(store.high_score(), 0);
        store.clear();
    }
}
