//! DeleteWorkspaceHandler - cascade-deletes a workspace and its contents.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::owned_workspace;
use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::ports::WorkspaceStore;

#[derive(Debug, Clone)]
pub struct DeleteWorkspaceCommand {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
}

pub struct DeleteWorkspaceHandler {
    workspaces: Arc<dyn WorkspaceStore>,
}

impl DeleteWorkspaceHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>) -> Self {
        Self { workspaces }
    }

    pub async fn handle(&self, cmd: DeleteWorkspaceCommand) -> Result<(), DomainError> {
        owned_workspace(&*self.workspaces, cmd.workspace_id, cmd.user_id).await?;
        self.workspaces.delete(cmd.workspace_id).await?;
        info!(workspace_id = %cmd.workspace_id, "workspace deleted");
        Ok(())
    }
}
