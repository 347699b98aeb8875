//! RenameWorkspaceHandler.

use std::sync::Arc;

use crate::application::handlers::owned_workspace;
use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::ports::WorkspaceStore;

#[derive(Debug, Clone)]
pub struct RenameWorkspaceCommand {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub name: String,
}

pub struct RenameWorkspaceHandler {
    workspaces: Arc<dyn WorkspaceStore>,
}

impl RenameWorkspaceHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>) -> Self {
        Self { workspaces }
    }

    pub async fn handle(&self, cmd: RenameWorkspaceCommand) -> Result<(), DomainError> {
        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("workspace name must not be empty"));
        }
        owned_workspace(&*self.workspaces, cmd.workspace_id, cmd.user_id).await?;
        self.workspaces.rename(cmd.workspace_id, name).await
    }
}
