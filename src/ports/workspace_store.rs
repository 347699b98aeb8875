//! Workspace Store Port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::domain::workspace::Workspace;

#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    async fn insert(&self, name: &str, user_id: UserId) -> Result<Workspace, DomainError>;

    async fn find_by_id(&self, id: WorkspaceId) -> Result<Option<Workspace>, DomainError>;

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Workspace>, DomainError>;

    async fn rename(&self, id: WorkspaceId, name: &str) -> Result<(), DomainError>;

    /// Deletes the workspace and everything hanging off it (messages,
    /// documents, quizzes, trees) via foreign-key cascade.
    async fn delete(&self, id: WorkspaceId) -> Result<(), DomainError>;
}
