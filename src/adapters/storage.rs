use crate::domain::ports::Storage;
use crate::utils::error::{Result, StageError};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path)
            .await
            .map_err(|e| StageError::missing_input(path, e))
    }

    async fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir(path)
            .await
            .map_err(|e| StageError::write_failure(path, e))
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| StageError::write_failure(path, e))
    }

    async fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path)
            .await
            .map_err(|e| StageError::write_failure(path, e))
    }

    async fn copy_file(&self, source: &Path, destination: &Path) -> Result<u64> {
        if !fs::try_exists(source).await.unwrap_or(false) {
            return Err(StageError::missing_input(
                source,
                std::io::Error::new(std::io::ErrorKind::NotFound, "source image vanished"),
            ));
        }
        fs::copy(source, destination)
            .await
            .map_err(|e| StageError::write_failure(destination, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_preserves_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("face.jpg");
        let destination = temp_dir.path().join("copy.jpg");
        std::fs::write(&source, b"\xff\xd8raw-bytes").unwrap();

        let copied = tokio_test::block_on(LocalStorage::new().copy_file(&source, &destination))
            .unwrap();

        assert_eq!(copied, 11);
        assert_eq!(std::fs::read(&destination).unwrap(), b"\xff\xd8raw-bytes");
    }

    #[tokio::test]
    async fn test_copy_into_missing_parent_fails() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("face.jpg");
        std::fs::write(&source, b"x").unwrap();

        let err = LocalStorage::new()
            .copy_file(&source, &temp_dir.path().join("absent/face.jpg"))
            .await
            .unwrap_err();

        assert!(matches!(err, StageError::FilesystemWrite { .. }));
    }

    #[tokio::test]
    async fn test_missing_source_is_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let err = LocalStorage::new()
            .copy_file(&temp_dir.path().join("nope.jpg"), &temp_dir.path().join("out.jpg"))
            .await
            .unwrap_err();

        assert!(matches!(err, StageError::MissingInput { .. }));
    }

    #[tokio::test]
    async fn test_create_dir_requires_parent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new();

        assert!(storage.create_dir(&temp_dir.path().join("a")).await.is_ok());
        assert!(storage.create_dir(&temp_dir.path().join("b/c")).await.is_err());
        assert!(storage.exists(&temp_dir.path().join("a")).await);
    }
}
