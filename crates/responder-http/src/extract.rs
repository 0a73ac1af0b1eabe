//! Request body extraction.
//!
//! Creation endpoints accept either `application/json` or
//! `application/x-www-form-urlencoded` bodies.

use axum::{
    extract::{FromRequest, Request},
    http::header,
    Form, Json,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Body decoded as a form when the content type says so, as JSON otherwise.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            Ok(Payload(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            Ok(Payload(value))
        }
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use responder_core::NewAnswer;

    fn request(content_type: &str, body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn decodes_json_body() {
        let req = request("application/json", r#"{"author":"B","summary":"T"}"#);
        let Payload(answer) = Payload::<NewAnswer>::from_request(req, &()).await.unwrap();

        assert_eq!(answer.author, "B");
        assert_eq!(answer.summary, "T");
    }

    #[tokio::test]
    async fn decodes_form_body() {
        let req = request(
            "application/x-www-form-urlencoded; charset=utf-8",
            "author=John+Brown&summary=Some%20answer",
        );
        let Payload(answer) = Payload::<NewAnswer>::from_request(req, &()).await.unwrap();

        assert_eq!(answer.author, "John Brown");
        assert_eq!(answer.summary, "Some answer");
    }

    #[tokio::test]
    async fn incomplete_form_is_bad_request() {
        let req = request(FORM_CONTENT_TYPE, "author=B");
        let err = Payload::<NewAnswer>::from_request(req, &()).await.unwrap_err();

        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
