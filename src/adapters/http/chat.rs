//! HTTP surface for chat: one POST runs the full agent dispatch.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::application::handlers::chat::{
    ClearHistoryCommand, ClearHistoryHandler, GetHistoryHandler, GetHistoryQuery,
    SendMessageCommand, SendMessageHandler,
};
use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{UserId, WorkspaceId};

use super::middleware::CurrentUser;

#[derive(Clone)]
pub struct ChatHandlers {
    pub send: Arc<SendMessageHandler>,
    pub history: Arc<GetHistoryHandler>,
    pub clear: Arc<ClearHistoryHandler>,
}

pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/", post(send_message))
        .route("/:workspace_id", get(get_history).delete(clear_history))
        .with_state(handlers)
}

#[derive(Debug, Deserialize)]
struct SendMessageRequest {
    workspace_id: i64,
    content: String,
}

#[derive(Debug, Serialize)]
struct SendMessageResponse {
    user_message: ChatMessage,
    assistant_message: ChatMessage,
}

async fn send_message(
    State(handlers): State<ChatHandlers>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<SendMessageRequest>,
) -> Response {
    let cmd = SendMessageCommand {
        workspace_id: WorkspaceId::new(req.workspace_id),
        user_id,
        content: req.content,
    };
    match handlers.send.handle(cmd).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(SendMessageResponse {
                user_message: result.user_message,
                assistant_message: result.assistant_message,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    #[serde(default)]
    user_id: Option<i64>,
}

async fn get_history(
    State(handlers): State<ChatHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(workspace_id): Path<i64>,
    Query(params): Query<HistoryParams>,
) -> Response {
    let query = GetHistoryQuery {
        workspace_id: WorkspaceId::new(workspace_id),
        user_id,
        subject: params.user_id.map(UserId::new),
    };
    match handlers.history.handle(query).await {
        Ok(messages) => (StatusCode::OK, Json(messages)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn clear_history(
    State(handlers): State<ChatHandlers>,
    CurrentUser(user_id): CurrentUser,
    Path(workspace_id): Path<i64>,
) -> Response {
    let cmd = ClearHistoryCommand {
        workspace_id: WorkspaceId::new(workspace_id),
        user_id,
    };
    match handlers.clear.handle(cmd).await {
        Ok(deleted) => (StatusCode::OK, Json(ClearedResponse { deleted })).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Serialize)]
struct ClearedResponse {
    deleted: u64,
}
