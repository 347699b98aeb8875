//! PostgreSQL store implementations.

mod chat_store;
mod document_store;
mod mindmap_store;
mod quiz_store;
mod user_store;
mod workspace_store;

pub use chat_store::PostgresChatStore;
pub use document_store::PostgresDocumentStore;
pub use mindmap_store::PostgresMindmapStore;
pub use quiz_store::PostgresQuizStore;
pub use user_store::PostgresUserStore;
pub use workspace_store::PostgresWorkspaceStore;
