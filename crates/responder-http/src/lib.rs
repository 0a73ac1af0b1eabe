//! HTTP server for Responder.
//!
//! Exposes the question repository as a JSON REST API.

pub mod error;
pub mod extract;
mod logging;
pub mod routes;
mod state;

use axum::{middleware, routing::get, Router};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

pub use error::{ApiError, ErrorBody};
pub use state::SharedState;

/// Build the application router.
pub fn router(state: Arc<SharedState>) -> Router {
    Router::new()
        .route("/", get(routes::welcome))
        .route(
            "/questions",
            get(routes::get_questions).post(routes::add_question),
        )
        .route("/questions/{question_id}", get(routes::get_question_by_id))
        .route(
            "/questions/{question_id}/answers",
            get(routes::get_answers).post(routes::add_answer),
        )
        .route(
            "/questions/{question_id}/answers/{answer_id}",
            get(routes::get_answer),
        )
        .fallback(routes::not_found)
        .layer(middleware::from_fn(logging::log_requests))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<SharedState>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    log::info!("Responder listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Handle to a server running on a background thread.
pub struct HttpServerHandle {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<std::thread::JoinHandle<()>>,
}

impl HttpServerHandle {
    /// Address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Check if the server is running.
    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }

    /// Stop the server gracefully.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.join();
        }
    }
}

impl Drop for HttpServerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Start the HTTP server on the given host and port.
///
/// The socket is bound before returning, so port `0` picks a free port
/// that [`HttpServerHandle::local_addr`] reports. The server runs in a
/// separate thread with its own tokio runtime.
pub fn start(
    state: Arc<SharedState>,
    host: &str,
    port: u16,
) -> Result<HttpServerHandle, String> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let std_listener = std::net::TcpListener::bind(addr)
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;
    std_listener
        .set_nonblocking(true)
        .map_err(|e| format!("Failed to configure listener: {}", e))?;
    let addr = std_listener
        .local_addr()
        .map_err(|e| format!("Failed to read local address: {}", e))?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async move {
            let listener = match TcpListener::from_std(std_listener) {
                Ok(l) => l,
                Err(e) => {
                    log::error!("Failed to register listener on {}: {}", addr, e);
                    return;
                }
            };

            let shutdown = async move {
                shutdown_rx.await.ok();
                log::info!("HTTP server shutting down");
            };

            if let Err(e) = serve(listener, state, shutdown).await {
                log::error!("HTTP server error: {}", e);
            }
        });
    });

    Ok(HttpServerHandle {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn start_rejects_invalid_address() {
        let state = Arc::new(SharedState::with_data_file("questions.json"));
        let result = start(state, "not-an-ip", 0);

        assert!(result.is_err());
        assert!(result.err().unwrap().contains("Invalid address"));
    }

    #[test]
    fn server_starts_and_stops() {
        let dir = tempdir().unwrap();
        let state = Arc::new(SharedState::with_data_file(
            dir.path().join("questions.json"),
        ));

        let mut handle = start(state, "127.0.0.1", 0).unwrap();
        assert!(handle.is_running());
        assert_ne!(handle.local_addr().port(), 0);

        handle.stop();
        assert!(!handle.is_running());
    }

    #[test]
    fn serves_requests_end_to_end() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("questions.json");
        let state = Arc::new(SharedState::with_data_file(&path));
        state.repository.store().init().unwrap();

        let mut handle = start(state, "127.0.0.1", 0).unwrap();
        let base = format!("http://{}", handle.local_addr());

        let welcome: serde_json::Value = ureq::get(&format!("{}/", base))
            .call()
            .unwrap()
            .into_json()
            .unwrap();
        assert_eq!(welcome["message"], "Welcome to responder!");

        let response = ureq::post(&format!("{}/questions", base))
            .send_json(serde_json::json!({ "author": "A", "summary": "S" }))
            .unwrap();
        assert_eq!(response.status(), 201);
        let created: serde_json::Value = response.into_json().unwrap();
        let question_id = created["createdQuestionId"].as_str().unwrap().to_string();

        let response = ureq::post(&format!("{}/questions/{}/answers", base, question_id))
            .send_json(serde_json::json!({ "author": "B", "summary": "T" }))
            .unwrap();
        assert_eq!(response.status(), 201);

        let answers: serde_json::Value =
            ureq::get(&format!("{}/questions/{}/answers", base, question_id))
                .call()
                .unwrap()
                .into_json()
                .unwrap();
        assert_eq!(answers.as_array().unwrap().len(), 1);

        match ureq::get(&format!("{}/questions/unknown/answers/whatever", base)).call() {
            Err(ureq::Error::Status(code, response)) => {
                assert_eq!(code, 409);
                let body: ErrorBody = response.into_json().unwrap();
                assert_eq!(body.message, "question not found");
            }
            other => panic!("Expected 409, got {:?}", other.map(|r| r.status())),
        }

        handle.stop();

        let stored: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored.as_array().unwrap().len(), 1);
        assert_eq!(stored[0]["answers"].as_array().unwrap().len(), 1);
    }
}
