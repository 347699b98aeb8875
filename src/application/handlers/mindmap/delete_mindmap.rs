//! DeleteMindmapHandler.

use std::sync::Arc;

use crate::application::handlers::owned_workspace;
use crate::domain::foundation::{DomainError, TreeId, UserId};
use crate::ports::{MindmapStore, WorkspaceStore};

#[derive(Debug, Clone)]
pub struct DeleteMindmapCommand {
    pub tree_id: TreeId,
    pub user_id: UserId,
}

pub struct DeleteMindmapHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    mindmaps: Arc<dyn MindmapStore>,
}

impl DeleteMindmapHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>, mindmaps: Arc<dyn MindmapStore>) -> Self {
        Self {
            workspaces,
            mindmaps,
        }
    }

    pub async fn handle(&self, cmd: DeleteMindmapCommand) -> Result<(), DomainError> {
        let Some(tree) = self.mindmaps.find_tree(cmd.tree_id).await? else {
            return Err(DomainError::not_found("mindmap", cmd.tree_id));
        };
        owned_workspace(&*self.workspaces, tree.workspace_id, cmd.user_id).await?;
        self.mindmaps.delete_tree(cmd.tree_id).await
    }
}
