//! Local-filesystem file storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::StorageConfig;
use crate::ports::{FileArea, FileStorage, StorageError};

pub struct LocalFileStorage {
    upload_dir: PathBuf,
    generated_dir: PathBuf,
}

impl LocalFileStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            upload_dir: config.upload_path(),
            generated_dir: config.generated_path(),
        }
    }

    fn area_dir(&self, area: FileArea) -> &Path {
        match area {
            FileArea::Uploads => &self.upload_dir,
            FileArea::Generated => &self.generated_dir,
        }
    }

    fn checked_path(&self, area: FileArea, file_name: &str) -> Result<PathBuf, StorageError> {
        // File names come from users; never let them climb out of the area.
        if file_name.is_empty()
            || file_name.contains('/')
            || file_name.contains('\\')
            || file_name.contains("..")
        {
            return Err(StorageError::InvalidName(file_name.to_string()));
        }
        Ok(self.area_dir(area).join(file_name))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(
        &self,
        area: FileArea,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let path = self.checked_path(area, file_name)?;
        tokio::fs::create_dir_all(self.area_dir(area)).await?;
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    async fn read(&self, area: FileArea, file_name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.checked_path(area, file_name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(file_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, area: FileArea, file_name: &str) -> Result<(), StorageError> {
        let path = self.checked_path(area, file_name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(file_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn resolve(&self, area: FileArea, file_name: &str) -> Result<PathBuf, StorageError> {
        self.checked_path(area, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(dir: &Path) -> LocalFileStorage {
        LocalFileStorage::new(&StorageConfig {
            upload_dir: dir.join("uploads").to_string_lossy().into_owned(),
            generated_dir: dir.join("generated").to_string_lossy().into_owned(),
            index_dir: dir.join("indexes").to_string_lossy().into_owned(),
        })
    }

    #[tokio::test]
    async fn save_read_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        storage
            .save(FileArea::Uploads, "notes.txt", b"hello")
            .await
            .unwrap();
        assert_eq!(
            storage.read(FileArea::Uploads, "notes.txt").await.unwrap(),
            b"hello"
        );
        storage.delete(FileArea::Uploads, "notes.txt").await.unwrap();
        assert!(matches!(
            storage.read(FileArea::Uploads, "notes.txt").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn traversal_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        for name in ["../escape.txt", "a/b.txt", "..", ""] {
            assert!(matches!(
                storage.save(FileArea::Uploads, name, b"x").await,
                Err(StorageError::InvalidName(_))
            ));
        }
    }

    #[tokio::test]
    async fn areas_are_kept_apart() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        storage
            .save(FileArea::Generated, "summary.md", b"# notes")
            .await
            .unwrap();
        assert!(matches!(
            storage.read(FileArea::Uploads, "summary.md").await,
            Err(StorageError::NotFound(_))
        ));
    }
}
