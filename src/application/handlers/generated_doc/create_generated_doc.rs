//! CreateGeneratedDocHandler - produce a summary document or image on demand.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::document::{safe_file_name, GeneratedDoc, GeneratedDocKind};
use crate::domain::foundation::{UserId, WorkspaceId};
use crate::ports::{
    CompletionRequest, DocumentStore, FileArea, FileStorage, ImageGenerator, LanguageModel,
    ModelRole, WorkspaceStore,
};

use super::super::owned_workspace;
use super::GeneratedDocError;

#[derive(Debug, Clone)]
pub struct CreateGeneratedDocCommand {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub kind: GeneratedDocKind,
    pub prompt: String,
}

pub struct CreateGeneratedDocHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    documents: Arc<dyn DocumentStore>,
    storage: Arc<dyn FileStorage>,
    model: Arc<dyn LanguageModel>,
    images: Arc<dyn ImageGenerator>,
}

impl CreateGeneratedDocHandler {
    pub fn new(
        workspaces: Arc<dyn WorkspaceStore>,
        documents: Arc<dyn DocumentStore>,
        storage: Arc<dyn FileStorage>,
        model: Arc<dyn LanguageModel>,
        images: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            workspaces,
            documents,
            storage,
            model,
            images,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateGeneratedDocCommand,
    ) -> Result<GeneratedDoc, GeneratedDocError> {
        let prompt = cmd.prompt.trim();
        if prompt.is_empty() {
            return Err(GeneratedDocError::Validation(
                "prompt must not be empty".into(),
            ));
        }
        owned_workspace(self.workspaces.as_ref(), cmd.workspace_id, cmd.user_id).await?;

        let (bytes, ext) = match cmd.kind {
            GeneratedDocKind::Summary => {
                let request = CompletionRequest::new()
                    .with_message(
                        ModelRole::System,
                        "You write study documents in markdown. Produce a \
                         well-structured document with headings.",
                    )
                    .with_message(ModelRole::User, prompt.to_string());
                let markdown = self.model.complete(request).await?;
                (markdown.into_bytes(), "md")
            }
            GeneratedDocKind::Image => (self.images.generate(prompt).await?, "png"),
        };

        let file_name = safe_file_name(prompt, Utc::now(), ext);
        self.storage
            .save(FileArea::Generated, &file_name, &bytes)
            .await?;
        let doc = self
            .documents
            .insert_generated(&file_name, cmd.kind, cmd.workspace_id, cmd.user_id)
            .await?;
        info!(%doc.id, kind = %cmd.kind, "generated document created");
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryDocumentStore, InMemoryFileStorage, InMemoryImageGenerator,
        InMemoryWorkspaceStore,
    };
    use crate::ports::ModelError;
    use async_trait::async_trait;

    struct FixedModel(&'static str);

    #[async_trait]
    impl LanguageModel for FixedModel {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, ModelError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn summary_is_written_and_recorded() {
        let workspaces = Arc::new(InMemoryWorkspaceStore::new());
        let workspace = workspaces.insert("bio", UserId::new(1)).await.unwrap();
        let documents = Arc::new(InMemoryDocumentStore::new());
        let storage = Arc::new(InMemoryFileStorage::new());
        let handler = CreateGeneratedDocHandler::new(
            workspaces,
            documents.clone(),
            storage.clone(),
            Arc::new(FixedModel("# Photosynthesis\n\nPlants.")),
            Arc::new(InMemoryImageGenerator),
        );

        let doc = handler
            .handle(CreateGeneratedDocCommand {
                workspace_id: workspace.id,
                user_id: UserId::new(1),
                kind: GeneratedDocKind::Summary,
                prompt: "photosynthesis".into(),
            })
            .await
            .unwrap();

        assert!(doc.file_name.ends_with(".md"));
        let stored = storage
            .read(FileArea::Generated, &doc.file_name)
            .await
            .unwrap();
        assert!(stored.starts_with(b"# Photosynthesis"));
        assert_eq!(documents.list_generated(workspace.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn foreign_workspace_is_rejected() {
        let workspaces = Arc::new(InMemoryWorkspaceStore::new());
        let workspace = workspaces.insert("bio", UserId::new(1)).await.unwrap();
        let handler = CreateGeneratedDocHandler::new(
            workspaces,
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(InMemoryFileStorage::new()),
            Arc::new(FixedModel("doc")),
            Arc::new(InMemoryImageGenerator),
        );

        let err = handler
            .handle(CreateGeneratedDocCommand {
                workspace_id: workspace.id,
                user_id: UserId::new(2),
                kind: GeneratedDocKind::Image,
                prompt: "a cell".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GeneratedDocError::Store(_)));
    }
}
