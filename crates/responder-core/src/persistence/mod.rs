//! Persistence layer for questions and answers.
//!
//! # Overview
//!
//! All state lives in one JSON file, by default `questions.json` in the
//! working directory:
//!
//! ```text
//! questions.json      # JSON array of questions, answers nested inside
//! .tmpXXXXXX          # transient, one per save in progress
//! ```
//!
//! # Design Principles
//!
//! ## Whole-File Access
//!
//! Every operation reads the full file and every mutation writes the full
//! file back. Nothing is cached between calls, so the file is always the
//! source of truth.
//!
//! ## Atomic Writes
//!
//! Saves use write-then-rename to prevent corruption:
//!
//! 1. Write to a uniquely named temp file in the same directory
//! 2. Rename to `questions.json` (atomic on Unix)
//!
//! # Usage
//!
//! ```ignore
//! use responder_core::persistence::QuestionStore;
//!
//! let store = QuestionStore::new("questions.json");
//! let mut questions = store.load()?;
//! questions.push(question);
//! store.save(&questions)?;
//! ```

pub mod store;
pub mod types;

pub use store::{QuestionStore, StorageError};
pub use types::*;
