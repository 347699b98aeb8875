//! Chat Store Port - message history per workspace and user.

use async_trait::async_trait;

use crate::domain::chat::{ChatMessage, ChatRole};
use crate::domain::foundation::{DomainError, UserId, WorkspaceId};

#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn insert(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
        role: ChatRole,
        content: &str,
    ) -> Result<ChatMessage, DomainError>;

    /// Messages for the user in the workspace, oldest first.
    async fn history(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<Vec<ChatMessage>, DomainError>;

    /// The most recent `limit` messages, returned oldest first.
    async fn recent(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, DomainError>;

    /// Deletes the user's messages in the workspace, returning how many
    /// were removed.
    async fn clear(&self, workspace_id: WorkspaceId, user_id: UserId)
        -> Result<u64, DomainError>;
}
