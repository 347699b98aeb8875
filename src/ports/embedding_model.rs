//! Embedding Model Port - text embeddings for the document index.

use async_trait::async_trait;

use super::ModelError;

/// Port for embedding providers. Input order is preserved in the output.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Embed a batch of texts into fixed-dimension vectors.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError>;
}
