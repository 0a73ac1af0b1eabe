//! Persistence data types.
//!
//! # Data Model Overview
//!
//! Responder persists a single JSON file holding every question:
//!
//! ```text
//! questions.json
//! [
//!   {
//!     "id": "a35f5fe8-f4c8-4cc3-8058-07d9a1f29add",
//!     "author": "Jack London",
//!     "summary": "What is my name?",
//!     "answers": [
//!       { "id": "613d88d0-...", "author": "Brian McKenzie", "summary": "..." }
//!     ]
//!   }
//! ]
//! ```
//!
//! Identifiers are UUID v4 strings generated on the server. The same
//! structs are used for the file format and for the HTTP payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl QuestionId {
    /// Generate a fresh random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for QuestionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Unique identifier for an answer within its question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerId(pub String);

impl AnswerId {
    /// Generate a fresh random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AnswerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnswerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AnswerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for AnswerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// ============================================================================
// Stored Records
// ============================================================================

/// A question with its answers, as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub author: String,
    pub summary: String,

    /// Answers in the order they were added.
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// A single answer. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub author: String,
    pub summary: String,
}

// ============================================================================
// Creation Inputs
// ============================================================================

/// Payload for creating a question. The id is assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub author: String,
    pub summary: String,

    /// Optional answers to seed the question with.
    #[serde(default)]
    pub answers: Option<Vec<Answer>>,
}

impl NewQuestion {
    /// Attach an id, defaulting `answers` to an empty list.
    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            author: self.author,
            summary: self.summary,
            answers: self.answers.unwrap_or_default(),
        }
    }
}

/// Payload for appending an answer to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnswer {
    pub author: String,
    pub summary: String,
}

impl NewAnswer {
    pub fn into_answer(self, id: AnswerId) -> Answer {
        Answer {
            id,
            author: self.author,
            summary: self.summary,
        }
    }
}

// ============================================================================
// Operation Results
// ============================================================================

/// Returned after a question is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionResponse {
    pub created_question_id: QuestionId,
}

/// Returned after an answer is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAnswerResponse {
    pub updated_question_id: QuestionId,
    pub created_answer_id: AnswerId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_id_new_is_unique() {
        assert_ne!(QuestionId::new(), QuestionId::new());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&QuestionId::from("q-1")).unwrap();
        assert_eq!(json, "\"q-1\"");

        let id: AnswerId = serde_json::from_str("\"a-1\"").unwrap();
        assert_eq!(id.as_str(), "a-1");
    }

    #[test]
    fn question_without_answers_field_defaults_to_empty() {
        let json = r#"{ "id": "q-1", "author": "A", "summary": "S" }"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert!(question.answers.is_empty());
    }

    #[test]
    fn new_question_into_question_defaults_answers() {
        let dto: NewQuestion =
            serde_json::from_str(r#"{ "author": "A", "summary": "S" }"#).unwrap();
        let question = dto.into_question(QuestionId::from("q-1"));

        assert_eq!(question.id.as_str(), "q-1");
        assert_eq!(question.author, "A");
        assert_eq!(question.summary, "S");
        assert!(question.answers.is_empty());
    }

    #[test]
    fn new_question_keeps_supplied_answers() {
        let json = r#"{
            "author": "A",
            "summary": "S",
            "answers": [{ "id": "a-1", "author": "B", "summary": "T" }]
        }"#;
        let dto: NewQuestion = serde_json::from_str(json).unwrap();
        let question = dto.into_question(QuestionId::new());

        assert_eq!(question.answers.len(), 1);
        assert_eq!(question.answers[0].id.as_str(), "a-1");
    }

    #[test]
    fn new_question_requires_author_and_summary() {
        assert!(serde_json::from_str::<NewQuestion>(r#"{ "author": "A" }"#).is_err());
        assert!(serde_json::from_str::<NewAnswer>(r#"{ "summary": "S" }"#).is_err());
    }

    #[test]
    fn responses_use_camel_case() {
        let response = AddAnswerResponse {
            updated_question_id: QuestionId::from("q-1"),
            created_answer_id: AnswerId::from("a-1"),
        };
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["updatedQuestionId"], "q-1");
        assert_eq!(value["createdAnswerId"], "a-1");

        let value = serde_json::to_value(AddQuestionResponse {
            created_question_id: QuestionId::from("q-2"),
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({ "createdQuestionId": "q-2" }));
    }
}
