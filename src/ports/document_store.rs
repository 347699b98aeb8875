//! Document Store Port - uploaded documents and AI-generated artifacts.

use async_trait::async_trait;

use crate::domain::document::{Document, GeneratedDoc, GeneratedDocKind};
use crate::domain::foundation::{DocumentId, DomainError, GeneratedDocId, UserId, WorkspaceId};

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(
        &self,
        filename: &str,
        workspace_id: WorkspaceId,
    ) -> Result<Document, DomainError>;

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>, DomainError>;

    /// Uploads in the workspace, newest first.
    async fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Document>, DomainError>;

    async fn delete(&self, id: DocumentId) -> Result<(), DomainError>;

    async fn insert_generated(
        &self,
        file_name: &str,
        kind: GeneratedDocKind,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<GeneratedDoc, DomainError>;

    async fn find_generated(
        &self,
        id: GeneratedDocId,
    ) -> Result<Option<GeneratedDoc>, DomainError>;

    async fn list_generated(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<GeneratedDoc>, DomainError>;

    async fn delete_generated(&self, id: GeneratedDocId) -> Result<(), DomainError>;
}
