//! Mapping from failures to HTTP responses.
//!
//! Every error leaves the server as `{ "title", "code", "message" }`.
//! Domain errors keep their own status code and message; anything
//! unexpected becomes a generic 500 and the detail only goes to the log.

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use responder_core::RepositoryError;
use serde::{Deserialize, Serialize};

const GENERIC_MESSAGE: &str = "Something went wrong.";

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub title: String,
    pub code: u16,
    pub message: String,
}

/// Error type returned by request handlers.
#[derive(Debug)]
pub enum ApiError {
    /// A business rule violation with its own status code.
    Domain { code: StatusCode, message: String },
    /// The request body could not be parsed.
    BadRequest(String),
    /// No route matched.
    NotFound(String),
    /// Anything else. The message is logged, never returned.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain { code, .. } => *code,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let (title, message) = match self {
            ApiError::Domain { message, .. } => ("Exception", message.clone()),
            ApiError::BadRequest(message) => ("Bad Request", message.clone()),
            ApiError::NotFound(message) => ("Not Found", message.clone()),
            ApiError::Internal(_) => ("Server Error", GENERIC_MESSAGE.to_string()),
        };
        ErrorBody {
            title: title.to_string(),
            code: self.status().as_u16(),
            message,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e.status_code().and_then(|c| StatusCode::from_u16(c).ok()) {
            Some(code) => ApiError::Domain {
                code,
                message: e.to_string(),
            },
            None => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            log::error!("Request failed: {}", detail);
        }
        (self.status(), Json(self.body())).into_response()
    }
}
