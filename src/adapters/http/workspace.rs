//! HTTP surface for workspaces.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;

use crate::application::handlers::workspace::{
    CreateWorkspaceCommand, CreateWorkspaceHandler, DeleteWorkspaceCommand,
    DeleteWorkspaceHandler, ListWorkspacesHandler, ListWorkspacesQuery, RenameWorkspaceCommand,
    RenameWorkspaceHandler,
};
use crate::domain::foundation::WorkspaceId;

use super::middleware::CurrentUser;

#[derive(Clone)]
pub struct WorkspaceHandlers {
    pub create: Arc<CreateWorkspaceHandler>,
    pub list: Arc<ListWorkspacesHandler>,
    pub rename: Arc<RenameWorkspaceHandler>,
    pub delete: Arc<DeleteWorkspaceHandler>,
}

pub fn workspace_routes(handlers: WorkspaceHandlers) -> Router {
    Router::new()
        .route("/", get(list_workspaces).post(create_workspace))
        .route("/:id", patch(rename_workspace).delete(delete_workspace))
        .with_state(handlers)
}

#[derive(Debug, Deserialize)]
struct NameRequest {
    name: String,
}

async fn create_workspace(
    State(handlers): State<WorkspaceHandlers>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<NameRequest>,
) -> Response {
    let cmd = CreateWorkspaceCommand {
        name: req.name,
        user_id,
    };
    match handlers.create.handle(cmd).await {
        Ok(workspace) => (StatusCode::CREATED, Json(workspace)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn list_workspaces(
    State(handlers): State<WorkspaceHandlers>,
    CurrentUser(user_id): CurrentUser,
) -> Response {
    match handlers.list.handle(ListWorkspacesQuery { user_id }).await {
        Ok(workspaces) => (StatusCode::OK, Json(workspaces)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn rename_workspace(
    State(handlers): State<WorkspaceHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<NameRequest>,
) -> Response {
    let cmd = RenameWorkspaceCommand {
        workspace_id: WorkspaceId::new(id),
        user_id,
        name: req.name,
    };
    match handlers.rename.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

async fn delete_workspace(
    State(handlers): State<WorkspaceHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Response {
    let cmd = DeleteWorkspaceCommand {
        workspace_id: WorkspaceId::new(id),
        user_id,
    };
    match handlers.delete.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
