//! DeleteGeneratedDocHandler.

use std::sync::Arc;

use tracing::warn;

use crate::application::handlers::owned_workspace;
use crate::domain::foundation::{DomainError, GeneratedDocId, UserId};
use crate::ports::{DocumentStore, FileArea, FileStorage, WorkspaceStore};

#[derive(Debug, Clone)]
pub struct DeleteGeneratedDocCommand {
    pub generated_doc_id: GeneratedDocId,
    pub user_id: UserId,
}

pub struct DeleteGeneratedDocHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    documents: Arc<dyn DocumentStore>,
    storage: Arc<dyn FileStorage>,
}

impl DeleteGeneratedDocHandler {
    pub fn new(
        workspaces: Arc<dyn WorkspaceStore>,
        documents: Arc<dyn DocumentStore>,
        storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            workspaces,
            documents,
            storage,
        }
    }

    pub async fn handle(&self, cmd: DeleteGeneratedDocCommand) -> Result<(), DomainError> {
        let Some(doc) = self.documents.find_generated(cmd.generated_doc_id).await? else {
            return Err(DomainError::not_found("generated document", cmd.generated_doc_id));
        };
        owned_workspace(&*self.workspaces, doc.workspace_id, cmd.user_id).await?;

        self.documents.delete_generated(cmd.generated_doc_id).await?;
        if let Err(err) = self.storage.delete(FileArea::Generated, &doc.file_name).await {
            warn!(file_name = %doc.file_name, error = %err, "generated file could not be removed");
        }
        Ok(())
    }
}
