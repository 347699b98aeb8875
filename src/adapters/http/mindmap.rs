//! HTTP surface for mindmaps.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::application::handlers::mindmap::{
    CreateMindmapCommand, CreateMindmapHandler, DeleteMindmapCommand, DeleteMindmapHandler,
    ListMindmapsHandler, ListMindmapsQuery,
};
use crate::domain::foundation::{TreeId, WorkspaceId};

use super::middleware::CurrentUser;

#[derive(Clone)]
pub struct MindmapHandlers {
    pub create: Arc<CreateMindmapHandler>,
    pub list: Arc<ListMindmapsHandler>,
    pub delete: Arc<DeleteMindmapHandler>,
}

pub fn mindmap_routes(handlers: MindmapHandlers) -> Router {
    // GET takes a workspace id, DELETE a tree id; both methods share one
    // registration since axum allows only one capture name per segment.
    Router::new()
        .route("/", post(create_mindmap))
        .route("/:id", get(list_mindmaps).delete(delete_mindmap))
        .with_state(handlers)
}

#[derive(Debug, Deserialize)]
struct CreateMindmapRequest {
    workspace_id: i64,
    topic: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    depth: Option<u32>,
}

async fn create_mindmap(
    State(handlers): State<MindmapHandlers>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<CreateMindmapRequest>,
) -> Response {
    let cmd = CreateMindmapCommand {
        workspace_id: WorkspaceId::new(req.workspace_id),
        user_id,
        topic: req.topic,
        description: req.description,
        depth: req.depth,
    };
    match handlers.create.handle(cmd).await {
        Ok(result) => (StatusCode::CREATED, Json(result)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn list_mindmaps(
    State(handlers): State<MindmapHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(workspace_id): Path<i64>,
) -> Response {
    let query = ListMindmapsQuery {
        workspace_id: WorkspaceId::new(workspace_id),
        user_id,
    };
    match handlers.list.handle(query).await {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn delete_mindmap(
    State(handlers): State<MindmapHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Response {
    let cmd = DeleteMindmapCommand {
        tree_id: TreeId::new(id),
        user_id,
    };
    match handlers.delete.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
