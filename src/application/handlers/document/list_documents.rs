//! ListDocumentsHandler.

use std::sync::Arc;

use crate::application::handlers::owned_workspace;
use crate::domain::document::Document;
use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::ports::{DocumentStore, WorkspaceStore};

#[derive(Debug, Clone)]
pub struct ListDocumentsQuery {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
}

pub struct ListDocumentsHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    documents: Arc<dyn DocumentStore>,
}

impl ListDocumentsHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>, documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            workspaces,
            documents,
        }
    }

    pub async fn handle(&self, query: ListDocumentsQuery) -> Result<Vec<Document>, DomainError> {
        owned_workspace(&*self.workspaces, query.workspace_id, query.user_id).await?;
        self.documents.list_for_workspace(query.workspace_id).await
    }
}
