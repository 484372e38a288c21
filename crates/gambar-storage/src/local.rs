use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for image files (e.g., "/var/lib/gambar/images")
    /// * `base_url` - Base URL the directory is served under (e.g., "http://localhost:8080/images")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert storage key to filesystem path.
    ///
    /// Keys are flat: a separator, or a key that is exactly `.` or `..`, is rejected.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(key))
    }

    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<String> {
        let path = self.key_to_path(key)?;
        let size = data.len();

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| StorageError::write_failed(key, e))?;

        file.write_all(&data)
            .await
            .map_err(|e| StorageError::write_failed(key, e))?;

        file.sync_all()
            .await
            .map_err(|e| StorageError::write_failed(key, e))?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(self.generate_url(key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), key = %key, "Local storage delete successful");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_local_storage_put_and_delete() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8080/images/".to_string())
            .await
            .unwrap();

        let url = storage
            .put("1-avatar.png", "image/png", Bytes::from_static(b"png bytes"))
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:8080/images/1-avatar.png");
        let written = std::fs::read(dir.path().join("1-avatar.png")).unwrap();
        assert_eq!(written, b"png bytes");

        storage.delete("1-avatar.png").await.unwrap();
        assert!(!dir.path().join("1-avatar.png").exists());
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8080/images".to_string())
            .await
            .unwrap();

        for key in ["../escape.png", "nested/file.png", "..\\escape.png", "", ".", ".."] {
            let result = storage
                .put(key, "image/png", Bytes::from_static(b"x"))
                .await;
            assert!(
                matches!(result, Err(StorageError::InvalidKey(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[tokio::test]
    async fn test_dots_inside_a_flat_key_are_allowed() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8080/images".to_string())
            .await
            .unwrap();

        let url = storage
            .put("1-wedding..final.png", "image/png", Bytes::from_static(b"x"))
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:8080/images/1-wedding..final.png");
        assert!(dir.path().join("1-wedding..final.png").exists());
    }

    #[tokio::test]
    async fn test_local_storage_delete_nonexistent() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8080/images".to_string())
            .await
            .unwrap();

        assert!(storage.delete("missing.png").await.is_ok());
    }

    #[tokio::test]
    async fn test_write_failure_carries_key() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8080/images".to_string())
            .await
            .unwrap();
        std::fs::create_dir(dir.path().join("taken.png")).unwrap();

        let err = storage
            .put("taken.png", "image/png", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        match err {
            StorageError::WriteFailed { key, .. } => assert_eq!(key, "taken.png"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
