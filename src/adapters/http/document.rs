//! HTTP surface for uploaded documents: multipart upload, listing, preview.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::application::handlers::document::{
    DeleteDocumentCommand, DeleteDocumentHandler, ListDocumentsHandler, ListDocumentsQuery,
    UploadDocumentCommand, UploadDocumentHandler,
};
use crate::domain::foundation::{DocumentId, WorkspaceId};
use crate::ports::{FileArea, FileStorage};

use super::error::{error_response, storage_error_response, ErrorResponse};
use super::middleware::CurrentUser;

#[derive(Clone)]
pub struct DocumentHandlers {
    pub upload: Arc<UploadDocumentHandler>,
    pub list: Arc<ListDocumentsHandler>,
    pub delete: Arc<DeleteDocumentHandler>,
    pub storage: Arc<dyn FileStorage>,
}

pub fn document_routes(handlers: DocumentHandlers) -> Router {
    // GET takes a workspace id, DELETE a document id; both methods share
    // one registration since axum allows only one capture name per segment.
    Router::new()
        .route("/", post(upload_document))
        .route("/preview", post(preview_document))
        .route("/:id", get(list_documents).delete(delete_document))
        .with_state(handlers)
}

async fn upload_document(
    State(handlers): State<DocumentHandlers>,
    CurrentUser(user_id): CurrentUser,
    mut multipart: Multipart,
) -> Response {
    let mut workspace_id: Option<i64> = None;
    let mut filename: Option<String> = None;
    let mut bytes: Option<Vec<u8>> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name() {
            Some("workspace_id") => {
                workspace_id = field.text().await.ok().and_then(|t| t.parse().ok());
            }
            Some("file") => {
                filename = field.file_name().map(String::from);
                bytes = field.bytes().await.ok().map(|b| b.to_vec());
            }
            _ => {}
        }
    }

    let (Some(workspace_id), Some(filename), Some(bytes)) = (workspace_id, filename, bytes)
    else {
        return error_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse::bad_request("expected multipart fields `workspace_id` and `file`"),
        );
    };

    let cmd = UploadDocumentCommand {
        workspace_id: WorkspaceId::new(workspace_id),
        user_id,
        filename,
        bytes,
    };
    match handlers.upload.handle(cmd).await {
        Ok(document) => (StatusCode::CREATED, Json(document)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn list_documents(
    State(handlers): State<DocumentHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(workspace_id): Path<i64>,
) -> Response {
    let query = ListDocumentsQuery {
        workspace_id: WorkspaceId::new(workspace_id),
        user_id,
    };
    match handlers.list.handle(query).await {
        Ok(documents) => (StatusCode::OK, Json(documents)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn delete_document(
    State(handlers): State<DocumentHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Response {
    let cmd = DeleteDocumentCommand {
        document_id: DocumentId::new(id),
        user_id,
    };
    match handlers.delete.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct PreviewRequest {
    file_name: String,
}

/// Serves a stored upload by name. The storage adapter rejects names that
/// would escape the upload directory.
async fn preview_document(
    State(handlers): State<DocumentHandlers>,
    CurrentUser(_user_id): CurrentUser,
    Json(req): Json<PreviewRequest>,
) -> Response {
    match handlers.storage.read(FileArea::Uploads, &req.file_name).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            bytes,
        )
            .into_response(),
        Err(e) => storage_error_response(e),
    }
}
