//! In-memory stand-ins for external services (mail, search, images, index,
//! file storage), used by unit and integration tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::WorkspaceId;
use crate::ports::{
    DocumentIndex, EmailError, EmailSender, FileArea, FileStorage, ImageGenerator, IndexError,
    ModelError, SearchError, SearchProvider, StorageError,
};

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct InMemoryEmailSender {
    sent: Mutex<Vec<SentEmail>>,
}

impl InMemoryEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for InMemoryEmailSender {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: html_body.to_string(),
        });
        Ok(())
    }
}

/// Returns a fixed snippet list for every query.
pub struct InMemorySearchProvider {
    snippets: Vec<String>,
}

impl InMemorySearchProvider {
    pub fn with_snippets(snippets: Vec<&str>) -> Self {
        Self {
            snippets: snippets.into_iter().map(String::from).collect(),
        }
    }
}

#[async_trait]
impl SearchProvider for InMemorySearchProvider {
    async fn search(&self, _query: &str) -> Result<Vec<String>, SearchError> {
        Ok(self.snippets.clone())
    }
}

/// Produces a tiny fixed byte blob for every prompt.
#[derive(Default)]
pub struct InMemoryImageGenerator;

#[async_trait]
impl ImageGenerator for InMemoryImageGenerator {
    async fn generate(&self, _prompt: &str) -> Result<Vec<u8>, ModelError> {
        Ok(vec![0x89, b'P', b'N', b'G'])
    }
}

/// Keyword-overlap retrieval over chunks held in memory. Ranking is naive
/// but deterministic, which is what tests need.
#[derive(Default)]
pub struct InMemoryDocumentIndex {
    chunks: Mutex<HashMap<WorkspaceId, Vec<String>>>,
}

impl InMemoryDocumentIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentIndex for InMemoryDocumentIndex {
    async fn add_chunks(
        &self,
        workspace_id: WorkspaceId,
        chunks: Vec<String>,
    ) -> Result<(), IndexError> {
        self.chunks
            .lock()
            .unwrap()
            .entry(workspace_id)
            .or_default()
            .extend(chunks);
        Ok(())
    }

    async fn retrieve(
        &self,
        workspace_id: WorkspaceId,
        query: &str,
        k: usize,
    ) -> Result<Vec<String>, IndexError> {
        let store = self.chunks.lock().unwrap();
        let Some(chunks) = store.get(&workspace_id) else {
            return Err(IndexError::Missing(workspace_id));
        };
        let terms: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        let mut scored: Vec<(usize, &String)> = chunks
            .iter()
            .map(|chunk| {
                let lower = chunk.to_lowercase();
                let score = terms.iter().filter(|t| lower.contains(*t)).count();
                (score, chunk)
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(scored.into_iter().take(k).map(|(_, c)| c.clone()).collect())
    }

    async fn has_index(&self, workspace_id: WorkspaceId) -> bool {
        self.chunks.lock().unwrap().contains_key(&workspace_id)
    }
}

/// File storage backed by a map instead of a filesystem.
#[derive(Default)]
pub struct InMemoryFileStorage {
    files: Mutex<HashMap<(FileArea, String), Vec<u8>>>,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn save(
        &self,
        area: FileArea,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError> {
        self.files
            .lock()
            .unwrap()
            .insert((area, file_name.to_string()), bytes.to_vec());
        Ok(PathBuf::from(file_name))
    }

    async fn read(&self, area: FileArea, file_name: &str) -> Result<Vec<u8>, StorageError> {
        self.files
            .lock()
            .unwrap()
            .get(&(area, file_name.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(file_name.to_string()))
    }

    async fn delete(&self, area: FileArea, file_name: &str) -> Result<(), StorageError> {
        self.files
            .lock()
            .unwrap()
            .remove(&(area, file_name.to_string()))
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(file_name.to_string()))
    }

    fn resolve(&self, _area: FileArea, file_name: &str) -> Result<PathBuf, StorageError> {
        Ok(PathBuf::from(file_name))
    }
}
