//! Image upload gateway
//!
//! Validates the declared filename, derives a storage key, and performs exactly
//! one write per call. Retrying a call produces a second object, never an
//! overwrite.

use std::sync::Arc;

use bytes::Bytes;

use crate::keys::{content_type_for, generate_storage_key};
use crate::{Storage, StorageError, StorageResult};

/// An image written to the bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub key: String,
    pub url: String,
}

#[derive(Clone)]
pub struct ImageUploader {
    storage: Arc<dyn Storage>,
}

impl ImageUploader {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Store an image under a fresh key and return where it is served.
    ///
    /// Files whose extension is not jpg, jpeg, png or webp are rejected
    /// before anything is written.
    #[tracing::instrument(skip(self, data), fields(size_bytes = data.len()))]
    pub async fn upload(&self, filename: &str, data: Bytes) -> StorageResult<StoredImage> {
        let content_type = content_type_for(filename).ok_or_else(|| {
            StorageError::UnsupportedFileType(format!(
                "{} is not a supported image (use jpg, jpeg, png or webp)",
                crate::keys::basename(filename)
            ))
        })?;

        let key = generate_storage_key(filename);
        let url = self.storage.put(&key, content_type, data).await?;

        Ok(StoredImage { key, url })
    }

    /// Best-effort removal of an image written earlier in the same request.
    pub async fn discard(&self, image: &StoredImage) {
        if let Err(e) = self.storage.delete(&image.key).await {
            tracing::warn!(error = %e, key = %image.key, "Failed to delete orphaned image");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalStorage;
    use tempfile::tempdir;

    async fn uploader(dir: &std::path::Path) -> ImageUploader {
        let storage = LocalStorage::new(dir, "https://img.example.com/".to_string())
            .await
            .unwrap();
        ImageUploader::new(Arc::new(storage))
    }

    #[tokio::test]
    async fn test_upload_sanitizes_key_and_builds_url() {
        let dir = tempdir().unwrap();
        let uploader = uploader(dir.path()).await;

        let image = uploader
            .upload("My Photo.PNG", Bytes::from_static(b"\x89PNG"))
            .await
            .unwrap();

        assert!(image.key.ends_with("-My-Photo.PNG"));
        assert_eq!(image.url, format!("https://img.example.com/{}", image.key));
        assert!(dir.path().join(&image.key).exists());
    }

    #[tokio::test]
    async fn test_unsupported_type_writes_nothing() {
        let dir = tempdir().unwrap();
        let uploader = uploader(dir.path()).await;

        let err = uploader
            .upload("photo.gif", Bytes::from_static(b"GIF89a"))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::UnsupportedFileType(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_repeated_uploads_create_distinct_objects() {
        let dir = tempdir().unwrap();
        let uploader = uploader(dir.path()).await;

        let first = uploader.upload("a.jpg", Bytes::from_static(b"1")).await.unwrap();
        let second = uploader.upload("a.jpg", Bytes::from_static(b"2")).await.unwrap();

        assert_ne!(first.key, second.key);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn test_discard_removes_object() {
        let dir = tempdir().unwrap();
        let uploader = uploader(dir.path()).await;

        let image = uploader.upload("a.webp", Bytes::from_static(b"x")).await.unwrap();
        uploader.discard(&image).await;

        assert!(!dir.path().join(&image.key).exists());
    }
}
