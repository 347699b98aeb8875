//! UploadDocumentHandler - stores an uploaded file and indexes its text.
//!
//! Indexing failure does not fail the upload; the document is still stored
//! and listed, it just cannot be searched until re-uploaded.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::owned_workspace;
use crate::domain::document::Document;
use crate::domain::foundation::{DomainError, ErrorCode, UserId, WorkspaceId};
use crate::ports::{DocumentIndex, DocumentStore, FileArea, FileStorage, WorkspaceStore};

const CHUNK_SIZE: usize = 1000;
const CHUNK_OVERLAP: usize = 200;
const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "txt", "md"];

#[derive(Debug, Clone)]
pub struct UploadDocumentCommand {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct UploadDocumentHandler {
    workspaces: Arc<dyn WorkspaceStore>,
    documents: Arc<dyn DocumentStore>,
    storage: Arc<dyn FileStorage>,
    index: Arc<dyn DocumentIndex>,
}

impl UploadDocumentHandler {
    pub fn new(
        workspaces: Arc<dyn WorkspaceStore>,
        documents: Arc<dyn DocumentStore>,
        storage: Arc<dyn FileStorage>,
        index: Arc<dyn DocumentIndex>,
    ) -> Self {
        Self {
            workspaces,
            documents,
            storage,
            index,
        }
    }

    pub async fn handle(&self, cmd: UploadDocumentCommand) -> Result<Document, DomainError> {
        owned_workspace(&*self.workspaces, cmd.workspace_id, cmd.user_id).await?;

        let extension = cmd
            .filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(DomainError::validation(format!(
                "unsupported file type `.{extension}`; allowed: pdf, txt, md"
            )));
        }
        if cmd.bytes.is_empty() {
            return Err(DomainError::validation("uploaded file is empty"));
        }

        self.storage
            .save(FileArea::Uploads, &cmd.filename, &cmd.bytes)
            .await
            .map_err(|e| DomainError::new(ErrorCode::StorageError, e.to_string()))?;

        match extract_text(&extension, cmd.bytes).await {
            Ok(text) => {
                let chunks = chunk_text(&text, CHUNK_SIZE, CHUNK_OVERLAP);
                if !chunks.is_empty() {
                    if let Err(err) = self.index.add_chunks(cmd.workspace_id, chunks).await {
                        warn!(workspace_id = %cmd.workspace_id, error = %err, "document indexing failed");
                    }
                }
            }
            Err(err) => {
                warn!(filename = %cmd.filename, error = %err, "text extraction failed");
            }
        }

        let document = self.documents.insert(&cmd.filename, cmd.workspace_id).await?;
        info!(document_id = %document.id, filename = %document.filename, "document uploaded");
        Ok(document)
    }
}

async fn extract_text(extension: &str, bytes: Vec<u8>) -> Result<String, String> {
    if extension == "pdf" {
        // PDF parsing is CPU bound; keep it off the async workers.
        tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| e.to_string())?
    } else {
        String::from_utf8(bytes).map_err(|e| e.to_string())
    }
}

/// Splits text into overlapping chunks of at most `size` characters,
/// stepping `size - overlap` characters each time. Operates on char
/// boundaries, so multi-byte text never splits mid-character.
pub(crate) fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() || size == 0 {
        return Vec::new();
    }
    let step = size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + size).min(chars.len());
        let chunk: String = chars[start..end].iter().collect();
        if !chunk.trim().is_empty() {
            chunks.push(chunk);
        }
        if end == chars.len() {
            break;
        }
        start += step;
    }
    chunks
}
