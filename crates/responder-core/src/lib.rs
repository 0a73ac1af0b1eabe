//! # responder-core
//!
//! Core business logic for Responder, a small question and answer API.
//!
//! This crate is framework-agnostic and is used by the HTTP server
//! (`responder-http`) and the daemon binary (`responder-daemon`).
//!
//! ## Key Concepts
//!
//! - **Question**: A summary written by an author, with nested answers
//! - **Answer**: An immutable reply appended to a question
//! - **QuestionStore**: Whole-file JSON persistence
//! - **QuestionRepository**: Query and mutation operations on top of the store

pub mod persistence;
pub mod repository;

// Re-export commonly used types
pub use persistence::{
    AddAnswerResponse, AddQuestionResponse, Answer, AnswerId, NewAnswer, NewQuestion, Question,
    QuestionId, QuestionStore, StorageError,
};
pub use repository::{QuestionRepository, RepositoryError};
