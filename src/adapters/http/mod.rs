//! HTTP adapters - the REST API.
//!
//! Each area has its own router and handler-state struct; `api_router`
//! assembles them under `/api` with auth, tracing and CORS layers.

pub mod auth;
pub mod chat;
pub mod document;
pub mod error;
pub mod generated_doc;
pub mod middleware;
pub mod mindmap;
pub mod quiz;
pub mod workspace;

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::application::auth::TokenIssuer;

pub use auth::{auth_routes, AuthHandlers};
pub use chat::{chat_routes, ChatHandlers};
pub use document::{document_routes, DocumentHandlers};
pub use error::ErrorResponse;
pub use generated_doc::{generated_doc_routes, GeneratedDocHandlers};
pub use middleware::CurrentUser;
pub use mindmap::{mindmap_routes, MindmapHandlers};
pub use quiz::{question_routes, quiz_routes, QuizHandlers};
pub use workspace::{workspace_routes, WorkspaceHandlers};

pub struct ApiHandlers {
    pub auth: AuthHandlers,
    pub workspaces: WorkspaceHandlers,
    pub chats: ChatHandlers,
    pub documents: DocumentHandlers,
    pub generated_docs: GeneratedDocHandlers,
    pub quizzes: QuizHandlers,
    pub mindmaps: MindmapHandlers,
}

pub fn api_router(handlers: ApiHandlers, tokens: Arc<TokenIssuer>) -> Router {
    Router::new()
        .nest("/api/auth", auth_routes(handlers.auth))
        .nest("/api/workspaces", workspace_routes(handlers.workspaces))
        .nest("/api/chats", chat_routes(handlers.chats))
        .nest("/api/documents", document_routes(handlers.documents))
        .nest("/api/ai-docs", generated_doc_routes(handlers.generated_docs))
        .nest("/api/quizzes", quiz_routes(handlers.quizzes.clone()))
        .nest("/api/questions", question_routes(handlers.quizzes))
        .nest("/api/mindmaps", mindmap_routes(handlers.mindmaps))
        .layer(axum::middleware::from_fn_with_state(
            tokens,
            middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
