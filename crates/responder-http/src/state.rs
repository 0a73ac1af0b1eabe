//! Shared state for the HTTP server.
//!
//! Wraps the question repository built once at startup.

use responder_core::{QuestionRepository, QuestionStore};
use std::path::PathBuf;

/// Shared state available to all HTTP handlers.
#[derive(Clone)]
pub struct SharedState {
    /// Repository bound to the data file for this process.
    pub repository: QuestionRepository,
}

impl SharedState {
    /// Create a new shared state around an existing repository.
    pub fn new(repository: QuestionRepository) -> Self {
        Self { repository }
    }

    /// Create a shared state backed by the data file at `path`.
    pub fn with_data_file(path: impl Into<PathBuf>) -> Self {
        Self::new(QuestionRepository::new(QuestionStore::new(path)))
    }
}
