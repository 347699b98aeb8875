//! CreateWorkspaceHandler.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::workspace::Workspace;
use crate::ports::WorkspaceStore;

#[derive(Debug, Clone)]
pub struct CreateWorkspaceCommand {
    pub name: String,
    pub user_id: UserId,
}

pub struct CreateWorkspaceHandler {
    workspaces: Arc<dyn WorkspaceStore>,
}

impl CreateWorkspaceHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>) -> Self {
        Self { workspaces }
    }

    pub async fn handle(&self, cmd: CreateWorkspaceCommand) -> Result<Workspace, DomainError> {
        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("workspace name must not be empty"));
        }
        let workspace = self.workspaces.insert(name, cmd.user_id).await?;
        info!(workspace_id = %workspace.id, "workspace created");
        Ok(workspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryWorkspaceStore;

    #[tokio::test]
    async fn creates_a_trimmed_workspace() {
        let handler = CreateWorkspaceHandler::new(Arc::new(InMemoryWorkspaceStore::new()));
        let workspace = handler
            .handle(CreateWorkspaceCommand {
                name: "  biology  ".into(),
                user_id: UserId::new(1),
            })
            .await
            .unwrap();
        assert_eq!(workspace.name, "biology");
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let handler = CreateWorkspaceHandler::new(Arc::new(InMemoryWorkspaceStore::new()));
        assert!(handler
            .handle(CreateWorkspaceCommand {
                name: "   ".into(),
                user_id: UserId::new(1),
            })
            .await
            .is_err());
    }
}
