//! Disk-persisted embedding index, one JSON file per workspace.
//!
//! Each index file holds the chunk text alongside its embedding vector, so a
//! restart loses nothing and re-embedding is never needed. Retrieval is a
//! cosine-similarity scan; workspace corpora are small enough that a linear
//! pass beats maintaining an ANN structure.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::foundation::WorkspaceId;
use crate::ports::{DocumentIndex, EmbeddingModel, IndexError};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    text: String,
    vector: Vec<f32>,
}

pub struct EmbeddingIndex {
    embedder: Arc<dyn EmbeddingModel>,
    index_dir: PathBuf,
    cache: RwLock<HashMap<WorkspaceId, Vec<IndexEntry>>>,
}

impl EmbeddingIndex {
    pub fn new(embedder: Arc<dyn EmbeddingModel>, index_dir: PathBuf) -> Self {
        Self {
            embedder,
            index_dir,
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn index_path(&self, workspace_id: WorkspaceId) -> PathBuf {
        self.index_dir.join(format!("ws_{workspace_id}.json"))
    }

    /// Load a workspace index into the cache if it exists on disk.
    async fn load(&self, workspace_id: WorkspaceId) -> Result<Option<Vec<IndexEntry>>, IndexError> {
        if let Some(entries) = self.cache.read().await.get(&workspace_id) {
            return Ok(Some(entries.clone()));
        }
        let path = self.index_path(workspace_id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let entries: Vec<IndexEntry> = serde_json::from_slice(&bytes)
                    .map_err(|e| IndexError::Storage(format!("corrupt index file: {e}")))?;
                self.cache
                    .write()
                    .await
                    .insert(workspace_id, entries.clone());
                Ok(Some(entries))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(IndexError::Storage(e.to_string())),
        }
    }

    async fn persist(
        &self,
        workspace_id: WorkspaceId,
        entries: &[IndexEntry],
    ) -> Result<(), IndexError> {
        tokio::fs::create_dir_all(&self.index_dir)
            .await
            .map_err(|e| IndexError::Storage(e.to_string()))?;
        let bytes = serde_json::to_vec(entries)
            .map_err(|e| IndexError::Storage(e.to_string()))?;
        tokio::fs::write(self.index_path(workspace_id), bytes)
            .await
            .map_err(|e| IndexError::Storage(e.to_string()))
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl DocumentIndex for EmbeddingIndex {
    async fn add_chunks(
        &self,
        workspace_id: WorkspaceId,
        chunks: Vec<String>,
    ) -> Result<(), IndexError> {
        if chunks.is_empty() {
            return Ok(());
        }
        let vectors = self
            .embedder
            .embed(&chunks)
            .await
            .map_err(|e| IndexError::Embedding(e.to_string()))?;

        let mut entries = self.load(workspace_id).await?.unwrap_or_default();
        entries.extend(
            chunks
                .into_iter()
                .zip(vectors)
                .map(|(text, vector)| IndexEntry { text, vector }),
        );
        self.persist(workspace_id, &entries).await?;
        debug!(%workspace_id, total = entries.len(), "index updated");
        self.cache.write().await.insert(workspace_id, entries);
        Ok(())
    }

    async fn retrieve(
        &self,
        workspace_id: WorkspaceId,
        query: &str,
        k: usize,
    ) -> Result<Vec<String>, IndexError> {
        let Some(entries) = self.load(workspace_id).await? else {
            return Err(IndexError::Missing(workspace_id));
        };
        let query_vec = self
            .embedder
            .embed(&[query.to_string()])
            .await
            .map_err(|e| IndexError::Embedding(e.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| IndexError::Embedding("empty embedding response".into()))?;

        let mut scored: Vec<(f32, &IndexEntry)> = entries
            .iter()
            .map(|entry| (cosine_similarity(&query_vec, &entry.vector), entry))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored
            .into_iter()
            .take(k)
            .map(|(_, entry)| entry.text.clone())
            .collect())
    }

    async fn has_index(&self, workspace_id: WorkspaceId) -> bool {
        if self.cache.read().await.contains_key(&workspace_id) {
            return true;
        }
        tokio::fs::try_exists(self.index_path(workspace_id))
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ModelError;

    /// Embeds a text as a crude bag-of-letters vector so that similar texts
    /// get similar vectors.
    struct LetterEmbedder;

    #[async_trait]
    impl EmbeddingModel for LetterEmbedder {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
            Ok(texts
                .iter()
                .map(|t| {
                    let mut v = vec![0.0f32; 26];
                    for c in t.to_lowercase().chars() {
                        if c.is_ascii_lowercase() {
                            v[(c as u8 - b'a') as usize] += 1.0;
                        }
                    }
                    v
                })
                .collect())
        }
    }

    fn index(dir: &std::path::Path) -> EmbeddingIndex {
        EmbeddingIndex::new(Arc::new(LetterEmbedder), dir.to_path_buf())
    }

    #[tokio::test]
    async fn retrieval_ranks_by_similarity() {
        let dir = tempfile::tempdir().unwrap();
        let idx = index(dir.path());
        let ws = WorkspaceId::new(1);

        idx.add_chunks(
            ws,
            vec!["zzzz qqqq".into(), "photosynthesis".into(), "xxyy".into()],
        )
        .await
        .unwrap();

        let hits = idx.retrieve(ws, "photosynthesis", 1).await.unwrap();
        assert_eq!(hits, vec!["photosynthesis".to_string()]);
    }

    #[tokio::test]
    async fn index_survives_a_cold_cache() {
        let dir = tempfile::tempdir().unwrap();
        let ws = WorkspaceId::new(2);
        index(dir.path())
            .add_chunks(ws, vec!["mitochondria".into()])
            .await
            .unwrap();

        // A fresh instance reads the file back from disk.
        let cold = index(dir.path());
        assert!(cold.has_index(ws).await);
        let hits = cold.retrieve(ws, "mitochondria", 3).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn missing_workspace_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let idx = index(dir.path());
        let err = idx.retrieve(WorkspaceId::new(9), "anything", 3).await;
        assert!(matches!(err, Err(IndexError::Missing(_))));
        assert!(!idx.has_index(WorkspaceId::new(9)).await);
    }
}
