//! ClearHistoryHandler - wipes a user's messages in a workspace.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::ports::{ChatStore, WorkspaceStore};

use crate::application::handlers::owned_workspace;

#[derive(Debug, Clone)]
pub struct ClearHistoryCommand {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
}

pub struct ClearHistoryHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    chats: Arc<dyn ChatStore>,
}

impl ClearHistoryHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>, chats: Arc<dyn ChatStore>) -> Self {
        Self { workspaces, chats }
    }

    /// Returns the number of messages removed.
    pub async fn handle(&self, cmd: ClearHistoryCommand) -> Result<u64, DomainError> {
        owned_workspace(&*self.workspaces, cmd.workspace_id, cmd.user_id).await?;
        let deleted = self.chats.clear(cmd.workspace_id, cmd.user_id).await?;
        info!(workspace_id = %cmd.workspace_id, user_id = %cmd.user_id, deleted, "chat history cleared");
        Ok(deleted)
    }
}
