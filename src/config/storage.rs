//! Filesystem layout configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where uploads, generated documents and retrieval indexes live on disk
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Uploaded source documents
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// AI-generated documents, one subdirectory per workspace
    #[serde(default = "default_generated_dir")]
    pub generated_dir: String,

    /// Persisted embedding indexes, one subdirectory per workspace
    #[serde(default = "default_index_dir")]
    pub index_dir: String,
}

impl StorageConfig {
    pub fn upload_path(&self) -> PathBuf {
        PathBuf::from(&self.upload_dir)
    }

    pub fn generated_path(&self) -> PathBuf {
        PathBuf::from(&self.generated_dir)
    }

    pub fn index_path(&self) -> PathBuf {
        PathBuf::from(&self.index_dir)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.upload_dir.is_empty() {
            return Err(ValidationError::EmptyStoragePath("upload_dir"));
        }
        if self.generated_dir.is_empty() {
            return Err(ValidationError::EmptyStoragePath("generated_dir"));
        }
        if self.index_dir.is_empty() {
            return Err(ValidationError::EmptyStoragePath("index_dir"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            generated_dir: default_generated_dir(),
            index_dir: default_index_dir(),
        }
    }
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_generated_dir() -> String {
    "generated_docs".to_string()
}

fn default_index_dir() -> String {
    "indexes".to_string()
}
