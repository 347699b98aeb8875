//! Document Index Port - per-workspace retrieval over uploaded documents.
//!
//! The index itself (embedding storage, similarity search) is an adapter
//! concern; the application only adds chunks and retrieves relevant ones.

use async_trait::async_trait;

use crate::domain::foundation::WorkspaceId;

#[async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Add text chunks from a newly uploaded document to the workspace index,
    /// creating the index when it does not exist yet.
    async fn add_chunks(
        &self,
        workspace_id: WorkspaceId,
        chunks: Vec<String>,
    ) -> Result<(), IndexError>;

    /// Return the `k` most relevant chunks for the query.
    async fn retrieve(
        &self,
        workspace_id: WorkspaceId,
        query: &str,
        k: usize,
    ) -> Result<Vec<String>, IndexError>;

    /// Whether the workspace has an index at all. When it does not, the
    /// document-search tool is simply not offered to that workspace's agent.
    async fn has_index(&self, workspace_id: WorkspaceId) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("index storage error: {0}")]
    Storage(String),

    #[error("embedding failed: {0}")]
    Embedding(String),

    #[error("no index exists for workspace {0}")]
    Missing(WorkspaceId),
}
