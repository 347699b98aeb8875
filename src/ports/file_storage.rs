//! File Storage Port - uploaded and generated files on disk or elsewhere.

use async_trait::async_trait;
use std::path::PathBuf;

/// Which bucket a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileArea {
    Uploads,
    Generated,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persist bytes under the area and return the stored path.
    async fn save(
        &self,
        area: FileArea,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError>;

    async fn read(&self, area: FileArea, file_name: &str) -> Result<Vec<u8>, StorageError>;

    async fn delete(&self, area: FileArea, file_name: &str) -> Result<(), StorageError>;

    /// Absolute path for a stored file, for streaming responses.
    fn resolve(&self, area: FileArea, file_name: &str) -> Result<PathBuf, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("file name is not allowed: {0}")]
    InvalidName(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
