//! Question and answer repository.
//!
//! Each operation loads the whole collection from the [`QuestionStore`],
//! works on it in memory and, for mutations, saves the whole collection
//! back. Nothing is held between calls.
//!
//! # Concurrency
//!
//! There is no locking. Two mutations racing each other both run a full
//! load/save cycle and the later save wins, dropping the other update.

use thiserror::Error;

use crate::persistence::{
    AddAnswerResponse, AddQuestionResponse, Answer, AnswerId, NewAnswer, NewQuestion, Question,
    QuestionId, QuestionStore, StorageError,
};

#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The referenced question does not exist.
    #[error("question not found")]
    QuestionNotFound(QuestionId),

    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl RepositoryError {
    /// Status code carried by domain errors. Storage failures have none.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RepositoryError::QuestionNotFound(_) => Some(409),
            RepositoryError::Storage(_) => None,
        }
    }
}

/// Query and mutation operations over the stored questions.
///
/// Built once per process and shared by every request handler. A data
/// file that does not exist yet counts as an empty store; call
/// [`QuestionStore::init`] to create it up front.
#[derive(Debug, Clone)]
pub struct QuestionRepository {
    store: QuestionStore,
}

impl QuestionRepository {
    pub fn new(store: QuestionStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &QuestionStore {
        &self.store
    }

    /// All questions in stored order.
    pub fn get_questions(&self) -> Result<Vec<Question>, RepositoryError> {
        Ok(self.store.load()?)
    }

    pub fn get_question_by_id(
        &self,
        question_id: &QuestionId,
    ) -> Result<Option<Question>, RepositoryError> {
        let questions = self.store.load()?;
        Ok(find_question(&questions, question_id).cloned())
    }

    /// Store a new question under a freshly generated id.
    pub fn add_question(
        &self,
        question: NewQuestion,
    ) -> Result<AddQuestionResponse, RepositoryError> {
        let mut questions = self.store.load()?;
        let new_question = question.into_question(QuestionId::new());
        let created_question_id = new_question.id.clone();

        questions.push(new_question);
        self.store.save(&questions)?;

        log::info!("Added question {}", created_question_id);
        Ok(AddQuestionResponse {
            created_question_id,
        })
    }

    /// Answers of a question; empty when the question does not exist.
    pub fn get_answers(&self, question_id: &QuestionId) -> Result<Vec<Answer>, RepositoryError> {
        let questions = self.store.load()?;
        Ok(find_question(&questions, question_id)
            .map(|q| q.answers.clone())
            .unwrap_or_default())
    }

    /// Look up one answer.
    ///
    /// Fails with [`RepositoryError::QuestionNotFound`] when the question is
    /// missing, but returns `None` when only the answer is missing.
    pub fn get_answer(
        &self,
        question_id: &QuestionId,
        answer_id: &AnswerId,
    ) -> Result<Option<Answer>, RepositoryError> {
        let questions = self.store.load()?;
        let question = find_question(&questions, question_id)
            .ok_or_else(|| RepositoryError::QuestionNotFound(question_id.clone()))?;
        Ok(find_answer(question, answer_id).cloned())
    }

    /// Append an answer to a question and rewrite the collection.
    ///
    /// The store is left untouched when the question does not exist.
    pub fn add_answer(
        &self,
        question_id: &QuestionId,
        answer: NewAnswer,
    ) -> Result<AddAnswerResponse, RepositoryError> {
        let mut questions = self.store.load()?;
        let question = find_question_mut(&mut questions, question_id)
            .ok_or_else(|| RepositoryError::QuestionNotFound(question_id.clone()))?;

        let new_answer = answer.into_answer(AnswerId::new());
        let response = AddAnswerResponse {
            updated_question_id: question.id.clone(),
            created_answer_id: new_answer.id.clone(),
        };
        question.answers.push(new_answer);

        self.store.save(&questions)?;

        log::info!(
            "Added answer {} to question {}",
            response.created_answer_id,
            response.updated_question_id
        );
        Ok(response)
    }
}

// ============================================================================
// Lookup Helpers
// ============================================================================

/// First question with a matching id.
fn find_question<'a>(questions: &'a [Question], id: &QuestionId) -> Option<&'a Question> {
    questions.iter().find(|q| &q.id == id)
}

fn find_question_mut<'a>(
    questions: &'a mut [Question],
    id: &QuestionId,
) -> Option<&'a mut Question> {
    questions.iter_mut().find(|q| &q.id == id)
}

/// First answer of `question` with a matching id.
fn find_answer<'a>(question: &'a Question, id: &AnswerId) -> Option<&'a Answer> {
    question.answers.iter().find(|a| &a.id == id)
}

// ============================================================================
// TESTS
// ============================================================================
