//! HTTP interface.
//!
//! Serves the upload page and a JSON API over a [`QueryPort`]:
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /` | Upload form |
//! | `GET /health` | Liveness |
//! | `POST /query` | Multipart `prompt` + `db`, returns `{sql, result, error?}` |
//! | `POST /schema` | Multipart `db`, returns rendered schema and tables |
//! | `/examples`, `/annotations` | List, add, clear, and `DELETE /:id` |

mod error;
mod handler;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

pub use error::{ApiError, ErrorResponse, MISSING_FIELDS};

use crate::error::Result;
use crate::port::inbound::QueryPort;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub port: Arc<dyn QueryPort>,
}

impl AppState {
    pub fn new(port: Arc<dyn QueryPort>) -> Self {
        Self { port }
    }
}

/// Build the router. `max_upload_bytes` bounds every request body.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handler::index))
        .route("/health", get(handler::health))
        .route("/query", post(handler::query))
        .route("/schema", post(handler::schema))
        .route(
            "/examples",
            get(handler::list_examples)
                .post(handler::add_example)
                .delete(handler::clear_examples),
        )
        .route("/examples/:id", delete(handler::remove_example))
        .route(
            "/annotations",
            get(handler::list_annotations)
                .post(handler::add_annotation)
                .delete(handler::clear_annotations),
        )
        .route("/annotations/:id", delete(handler::remove_annotation))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %Uuid::new_v4(),
                )
            }),
        )
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(port: Arc<dyn QueryPort>, addr: SocketAddr, max_upload_bytes: usize) -> Result<()> {
    let app = router(AppState::new(port), max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::adapter::outbound::llm::client::tests::{FailingLlm, MockLlm};
    use crate::adapter::outbound::memory::MemoryContextStore;
    use crate::adapter::outbound::sqlite::engine::SqliteEngine;
    use crate::application::query::QueryService;
    use crate::port::outbound::llm::Llm;

    const BOUNDARY: &str = "askdb-test-boundary";

    fn app(llm: Arc<dyn Llm>) -> Router {
        let service = QueryService::new(SqliteEngine::new(), MemoryContextStore::new(), llm);
        router(AppState::new(Arc::new(service)), 1024 * 1024)
    }

    fn fixture_bytes() -> Vec<u8> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.sqlite");
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT);
             INSERT INTO users (name) VALUES ('ada'), ('grace');",
        )
        .unwrap();
        drop(conn);
        std::fs::read(&path).unwrap()
    }

    fn multipart(prompt: Option<&str>, db: Option<&[u8]>) -> Request<Body> {
        let mut body = Vec::new();
        if let Some(prompt) = prompt {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"prompt\"\r\n\r\n{prompt}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(db) = db {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"db\"; filename=\"test.sqlite\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(db);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/query")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(Arc::new(MockLlm::new("")))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn index_serves_html() {
        let response = app(Arc::new(MockLlm::new("")))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn query_returns_sql_and_rows() {
        let llm = Arc::new(MockLlm::new("```sql\nSELECT name FROM users ORDER BY id;\n```"));
        let response = app(llm)
            .oneshot(multipart(Some("list names"), Some(&fixture_bytes())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({
                "sql": "SELECT name FROM users ORDER BY id;",
                "result": [{"name": "ada"}, {"name": "grace"}]
            })
        );
    }

    #[tokio::test]
    async fn query_execution_error_is_still_ok() {
        let llm = Arc::new(MockLlm::new("SELECT * FROM people"));
        let response = app(llm)
            .oneshot(multipart(Some("everyone"), Some(&fixture_bytes())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["sql"], "SELECT * FROM people");
        assert_eq!(body["result"], json!([]));
        assert!(body["error"].as_str().unwrap().contains("no such table"));
    }

    #[tokio::test]
    async fn query_without_file_is_bad_request() {
        let response = app(Arc::new(MockLlm::new("SELECT 1")))
            .oneshot(multipart(Some("anything"), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({"error": MISSING_FIELDS}));
    }

    #[tokio::test]
    async fn query_with_blank_prompt_is_bad_request() {
        let response = app(Arc::new(MockLlm::new("SELECT 1")))
            .oneshot(multipart(Some("   "), Some(&fixture_bytes())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn query_model_failure_is_bad_gateway() {
        let response = app(Arc::new(FailingLlm))
            .oneshot(multipart(Some("anything"), Some(&fixture_bytes())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("LLM request failed"));
    }

    #[tokio::test]
    async fn examples_can_be_added_and_removed() {
        let app = app(Arc::new(MockLlm::new("")));

        let response = app
            .clone()
            .oneshot(
                Request::post("/examples")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"question":"how many users","sql":"SELECT COUNT(*) FROM users"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = json_body(response).await["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(Request::get("/examples").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);

        let response = app
            .clone()
            .oneshot(
                Request::delete(format!("/examples/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::delete(format!("/examples/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn blank_annotation_is_bad_request() {
        let response = app(Arc::new(MockLlm::new("")))
            .oneshot(
                Request::post("/annotations")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"text":"  "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
