//! HTTP surface for AI-generated documents.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::application::handlers::generated_doc::{
    CreateGeneratedDocCommand, CreateGeneratedDocHandler, DeleteGeneratedDocCommand,
    DeleteGeneratedDocHandler, ListGeneratedDocsHandler, ListGeneratedDocsQuery,
};
use crate::domain::document::GeneratedDocKind;
use crate::domain::foundation::{GeneratedDocId, WorkspaceId};
use crate::ports::{DocumentStore, FileArea, FileStorage};

use super::error::{error_response, storage_error_response, ErrorResponse};
use super::middleware::CurrentUser;

#[derive(Clone)]
pub struct GeneratedDocHandlers {
    pub create: Arc<CreateGeneratedDocHandler>,
    pub list: Arc<ListGeneratedDocsHandler>,
    pub delete: Arc<DeleteGeneratedDocHandler>,
    pub documents: Arc<dyn DocumentStore>,
    pub storage: Arc<dyn FileStorage>,
}

pub fn generated_doc_routes(handlers: GeneratedDocHandlers) -> Router {
    // GET takes a workspace id, DELETE a generated-doc id; both methods
    // share one registration since axum allows only one capture name per
    // segment.
    Router::new()
        .route("/", post(create_generated_doc))
        .route("/:id", get(list_generated_docs).delete(delete_generated_doc))
        .route("/:id/download", get(download_generated_doc))
        .with_state(handlers)
}

#[derive(Debug, Deserialize)]
struct CreateRequest {
    workspace_id: i64,
    kind: GeneratedDocKind,
    prompt: String,
}

async fn create_generated_doc(
    State(handlers): State<GeneratedDocHandlers>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<CreateRequest>,
) -> Response {
    let workspace_id = WorkspaceId::new(req.workspace_id);
    let cmd = CreateGeneratedDocCommand {
        workspace_id,
        user_id,
        kind: req.kind,
        prompt: req.prompt,
    };
    if let Err(e) = handlers.create.handle(cmd).await {
        return e.into_response();
    }
    // Respond with the workspace's full generated list.
    let query = ListGeneratedDocsQuery {
        workspace_id,
        user_id,
    };
    match handlers.list.handle(query).await {
        Ok(docs) => (StatusCode::CREATED, Json(docs)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn list_generated_docs(
    State(handlers): State<GeneratedDocHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(workspace_id): Path<i64>,
) -> Response {
    let query = ListGeneratedDocsQuery {
        workspace_id: WorkspaceId::new(workspace_id),
        user_id,
    };
    match handlers.list.handle(query).await {
        Ok(docs) => (StatusCode::OK, Json(docs)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn delete_generated_doc(
    State(handlers): State<GeneratedDocHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Response {
    let cmd = DeleteGeneratedDocCommand {
        generated_doc_id: GeneratedDocId::new(id),
        user_id,
    };
    match handlers.delete.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

async fn download_generated_doc(
    State(handlers): State<GeneratedDocHandlers>,
    CurrentUser(_user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Response {
    let doc = match handlers.documents.find_generated(GeneratedDocId::new(id)).await {
        Ok(Some(doc)) => doc,
        Ok(None) => {
            return error_response(
                StatusCode::NOT_FOUND,
                ErrorResponse::new("generated document not found", "NOT_FOUND"),
            )
        }
        Err(e) => return e.into_response(),
    };
    let content_type = match doc.kind {
        GeneratedDocKind::Image => "image/png",
        GeneratedDocKind::Summary => "text/markdown",
    };
    match handlers.storage.read(FileArea::Generated, &doc.file_name).await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", doc.file_name),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => storage_error_response(e),
    }
}
