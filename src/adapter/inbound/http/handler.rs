//! Route handlers.

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::error::{ApiError, MISSING_FIELDS};
use super::AppState;
use crate::adapter::outbound::sqlite::upload::UploadedDatabase;
use crate::domain::context::{Annotation, Example};
use crate::domain::error::DomainError;
use crate::domain::query::QueryOutcome;
use crate::domain::schema::Table;
use crate::error::Error;

const INDEX_HTML: &str = include_str!("index.html");

/// Fields read from a multipart upload form.
#[derive(Debug, Default)]
struct UploadForm {
    prompt: Option<String>,
    db: Option<Bytes>,
}

impl UploadForm {
    async fn read(multipart: std::result::Result<Multipart, MultipartRejection>) -> Result<Self, ApiError> {
        // A body that is not multipart at all has neither field.
        let Ok(mut multipart) = multipart else {
            return Ok(Self::default());
        };

        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge(e.body_text())
            } else {
                ApiError::BadRequest(format!("Failed to read multipart field: {e}"))
            }
        })? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "prompt" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read prompt: {e}")))?;
                    form.prompt = Some(text);
                }
                "db" => {
                    // An empty file input arrives without a filename, or as a plain field.
                    if !field.file_name().is_some_and(|name| !name.is_empty()) {
                        debug!("Ignoring db field without a file");
                        continue;
                    }
                    let bytes = field.bytes().await.map_err(|e| {
                        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                            ApiError::PayloadTooLarge(e.body_text())
                        } else {
                            ApiError::BadRequest(format!("Failed to read DB file: {e}"))
                        }
                    })?;
                    form.db = Some(bytes);
                }
                other => debug!(field = other, "Ignoring unknown form field"),
            }
        }
        Ok(form)
    }

    async fn save_db(&self) -> Result<Option<UploadedDatabase>, ApiError> {
        let Some(bytes) = self.db.clone() else {
            return Ok(None);
        };
        let upload = tokio::task::spawn_blocking(move || UploadedDatabase::from_bytes(&bytes))
            .await
            .map_err(Error::from)??;
        Ok(Some(upload))
    }
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /query`: answer a question against an uploaded database.
pub async fn query(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<QueryOutcome>, ApiError> {
    let form = UploadForm::read(multipart).await?;

    let prompt = form
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string);
    let (Some(prompt), Some(db)) = (prompt, form.save_db().await?) else {
        return Err(ApiError::BadRequest(MISSING_FIELDS.to_string()));
    };

    let outcome = state.port.ask(db.path(), &prompt).await?;
    info!(
        success = outcome.is_success(),
        rows = outcome.result.len(),
        "Query answered"
    );
    Ok(Json(outcome))
}

#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub schema: String,
    pub tables: Vec<Table>,
}

/// `POST /schema`: introspect an uploaded database without asking anything.
pub async fn schema(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<SchemaResponse>, ApiError> {
    let form = UploadForm::read(multipart).await?;
    let Some(db) = form.save_db().await? else {
        return Err(ApiError::BadRequest("Missing DB file".to_string()));
    };

    let schema = state.port.schema(db.path()).await?;
    Ok(Json(SchemaResponse {
        schema: schema.render(),
        tables: schema.tables,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ExampleRequest {
    pub question: String,
    pub sql: String,
}

#[derive(Debug, Deserialize)]
pub struct AnnotationRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub removed: usize,
}

pub async fn list_examples(State(state): State<AppState>) -> Result<Json<Vec<Example>>, ApiError> {
    Ok(Json(state.port.list_examples().await?))
}

pub async fn add_example(
    State(state): State<AppState>,
    Json(request): Json<ExampleRequest>,
) -> Result<(StatusCode, Json<Example>), ApiError> {
    let example = state
        .port
        .add_example(&request.question, &request.sql)
        .await?;
    Ok((StatusCode::CREATED, Json(example)))
}

pub async fn remove_example(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.port.remove_example(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::from(DomainError::NotFound { kind: "example", id }).into())
    }
}

pub async fn clear_examples(State(state): State<AppState>) -> Result<Json<ClearResponse>, ApiError> {
    let removed = state.port.clear_examples().await?;
    Ok(Json(ClearResponse { removed }))
}

pub async fn list_annotations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Annotation>>, ApiError> {
    Ok(Json(state.port.list_annotations().await?))
}

pub async fn add_annotation(
    State(state): State<AppState>,
    Json(request): Json<AnnotationRequest>,
) -> Result<(StatusCode, Json<Annotation>), ApiError> {
    let annotation = state.port.add_annotation(&request.text).await?;
    Ok((StatusCode::CREATED, Json(annotation)))
}

pub async fn remove_annotation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.port.remove_annotation(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::from(DomainError::NotFound { kind: "annotation", id }).into())
    }
}

pub async fn clear_annotations(
    State(state): State<AppState>,
) -> Result<Json<ClearResponse>, ApiError> {
    let removed = state.port.clear_annotations().await?;
    Ok(Json(ClearResponse { removed }))
}
