//! Question file persistence.
//!
//! # Overview
//!
//! [`QuestionStore`] owns the location of the data file and moves the
//! whole collection between disk and memory. There is no partial read,
//! no streaming and no locking: callers load everything, change it, and
//! save everything back.
//!
//! # Atomic Write
//!
//! `save` writes to a uniquely named temp file next to the target and
//! renames it over the target, so a reader sees either the previous
//! contents or the new contents, never a half-written file. Concurrent
//! saves each use their own temp file; the last rename wins.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use super::types::Question;

/// Failure reading or writing the data file.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        StorageError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Whole-file accessor for the question collection.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    path: PathBuf,
}

impl QuestionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the data file with an empty collection if it is missing.
    pub fn init(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            return Ok(());
        }
        log::info!("Creating empty question store at {}", self.path.display());
        self.save(&[])
    }

    /// Load every question from disk.
    ///
    /// A missing file is an empty store, not an error.
    pub fn load(&self) -> Result<Vec<Question>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents =
            fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        serde_json::from_str(&contents).map_err(|e| StorageError::json(&self.path, e))
    }

    /// Replace the file contents with `questions`.
    pub fn save(&self, questions: &[Question]) -> Result<(), StorageError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

        let json =
            serde_json::to_string_pretty(questions).map_err(|e| StorageError::json(&self.path, e))?;

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;
        temp.write_all(json.as_bytes())
            .map_err(|e| StorageError::io(temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| StorageError::io(&self.path, e.error))?;

        log::debug!(
            "Saved {} questions to {}",
            questions.len(),
            self.path.display()
        );
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
