//! DeleteDocumentHandler - removes the row and the stored file.
//!
//! Already-indexed chunks stay in the workspace index; the index has no
//! per-document bookkeeping to remove them by.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::owned_workspace;
use crate::domain::foundation::{DocumentId, DomainError, UserId};
use crate::ports::{DocumentStore, FileArea, FileStorage, WorkspaceStore};

#[derive(Debug, Clone)]
pub struct DeleteDocumentCommand {
    pub document_id: DocumentId,
    pub user_id: UserId,
}

pub struct DeleteDocumentHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    documents: Arc<dyn DocumentStore>,
    storage: Arc<dyn FileStorage>,
}

impl DeleteDocumentHandler {
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

    pub async fn handle(&self, cmd: DeleteDocumentCommand) -> Result<(), DomainError> {
        let Some(document) = self.documents.find_by_id(cmd.document_id).await? else {
            return Err(DomainError::not_found("document", cmd.document_id));
        };
        owned_workspace(&*self.workspaces, document.workspace_id, cmd.user_id).await?;

        self.documents.delete(cmd.document_id).await?;
        if let Err(err) = self
            .storage
            .delete(FileArea::Uploads, &document.filename)
            .await
        {
            // The row is gone; a stale file on disk is only worth a warning.
            warn!(filename = %document.filename, error = %err, "stored file could not be removed");
        }
        info!(document_id = %cmd.document_id, "document deleted");
        Ok(())
    }
}
