//! ListGeneratedDocsHandler.

use std::sync::Arc;

use crate::application::handlers::owned_workspace;
use crate::domain::document::GeneratedDoc;
use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::ports::{DocumentStore, WorkspaceStore};

#[derive(Debug, Clone)]
pub struct ListGeneratedDocsQuery {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
}

pub struct ListGeneratedDocsHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    documents: Arc<dyn DocumentStore>,
}

impl ListGeneratedDocsHandler {
    pub fn new(workspaces: Arc<dyn WorkspaceStore>, documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            workspaces,
            documents,
        }
    }

    pub async fn handle(
        &self,
        query: ListGeneratedDocsQuery,
    ) -> Result<Vec<GeneratedDoc>, DomainError> {
        owned_workspace(&*self.workspaces, query.workspace_id, query.user_id).await?;
        self.documents.list_generated(query.workspace_id).await
    }
}
