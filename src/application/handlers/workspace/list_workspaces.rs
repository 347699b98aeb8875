//! ListWorkspacesHandler.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::workspace::Workspace;
use crate::ports::WorkspaceStore;

#[derive(Debug, Clone)]
pub struct ListWorkspacesQuery {
    pub user_id: UserId,
}

pub struct ListWorkspacesHandler {
    workspaces: Arc<dyn WorkspaceStore>,
}

impl ListWorkspacesHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>) -> Self {
        Self { workspaces }
    }

    pub async fn handle(&self, query: ListWorkspacesQuery) -> Result<Vec<Workspace>, DomainError> {
        self.workspaces.list_for_user(query.user_id).await
    }
}
