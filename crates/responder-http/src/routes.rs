//! HTTP route handlers.
//!
//! | Method | Path                                   | Handler              |
//! |--------|----------------------------------------|----------------------|
//! | GET    | `/`                                    | [`welcome`]          |
//! | GET    | `/questions`                           | [`get_questions`]    |
//! | POST   | `/questions`                           | [`add_question`]     |
//! | GET    | `/questions/{questionId}`              | [`get_question_by_id`] |
//! | GET    | `/questions/{questionId}/answers`      | [`get_answers`]      |
//! | POST   | `/questions/{questionId}/answers`      | [`add_answer`]       |
//! | GET    | `/questions/{questionId}/answers/{id}` | [`get_answer`]       |
//!
//! Handlers are thin: they extract parameters, call the repository and
//! serialize the result. Failures become [`ApiError`] responses.
//!
//! Repository calls do blocking file IO, so they run on tokio's blocking
//! pool rather than on the async workers.

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::Json,
};
use responder_core::{
    AddAnswerResponse, AddQuestionResponse, Answer, AnswerId, NewAnswer, NewQuestion, Question,
    QuestionId, QuestionRepository, RepositoryError,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::error::ApiError;
use super::extract::Payload;
use super::SharedState;

/// Run a repository operation on the blocking thread pool.
async fn with_repository<T, F>(state: &SharedState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&QuestionRepository) -> Result<T, RepositoryError> + Send + 'static,
    T: Send + 'static,
{
    let repository = state.repository.clone();
    tokio::task::spawn_blocking(move || op(&repository))
        .await
        .map_err(|e| ApiError::Internal(format!("Repository task failed: {}", e)))?
        .map_err(ApiError::from)
}

/// Handler for GET /
pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to responder!" }))
}

/// Handler for GET /questions
pub async fn get_questions(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let questions = with_repository(&state, |repo| repo.get_questions()).await?;
    Ok(Json(questions))
}

/// Handler for GET /questions/{questionId}
///
/// Responds with `null` when no question matches.
pub async fn get_question_by_id(
    Path(question_id): Path<String>,
    State(state): State<Arc<SharedState>>,
) -> Result<Json<Option<Question>>, ApiError> {
    let question_id = QuestionId::from(question_id);
    let question =
        with_repository(&state, move |repo| repo.get_question_by_id(&question_id)).await?;
    Ok(Json(question))
}

/// Handler for POST /questions
///
/// Accepts a JSON or form-encoded body.
pub async fn add_question(
    State(state): State<Arc<SharedState>>,
    Payload(question): Payload<NewQuestion>,
) -> Result<(StatusCode, Json<AddQuestionResponse>), ApiError> {
    let response = with_repository(&state, move |repo| repo.add_question(question)).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET /questions/{questionId}/answers
pub async fn get_answers(
    Path(question_id): Path<String>,
    State(state): State<Arc<SharedState>>,
) -> Result<Json<Vec<Answer>>, ApiError> {
    let question_id = QuestionId::from(question_id);
    let answers = with_repository(&state, move |repo| repo.get_answers(&question_id)).await?;
    Ok(Json(answers))
}

/// Handler for POST /questions/{questionId}/answers
///
/// Accepts a JSON or form-encoded body.
pub async fn add_answer(
    Path(question_id): Path<String>,
    State(state): State<Arc<SharedState>>,
    Payload(answer): Payload<NewAnswer>,
) -> Result<(StatusCode, Json<AddAnswerResponse>), ApiError> {
    let question_id = QuestionId::from(question_id);
    let response =
        with_repository(&state, move |repo| repo.add_answer(&question_id, answer)).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET /questions/{questionId}/answers/{answerId}
///
/// 409 when the question is unknown, `null` when only the answer is.
pub async fn get_answer(
    Path((question_id, answer_id)): Path<(String, String)>,
    State(state): State<Arc<SharedState>>,
) -> Result<Json<Option<Answer>>, ApiError> {
    let question_id = QuestionId::from(question_id);
    let answer_id = AnswerId::from(answer_id);
    let answer =
        with_repository(&state, move |repo| repo.get_answer(&question_id, &answer_id)).await?;
    Ok(Json(answer))
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

// ============================================================================
// TESTS
// ============================================================================
