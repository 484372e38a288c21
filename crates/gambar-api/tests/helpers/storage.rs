//! Storage wrapper that fails on demand.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use gambar_storage::{Storage, StorageBackend, StorageError, StorageResult};

/// Filename that makes `FlakyStorage::put` fail.
pub const BROKEN_FILENAME: &str = "broken.png";

/// Delegates to the inner storage, except that writing a key derived from
/// `BROKEN_FILENAME` fails as if the bucket were unreachable.
pub struct FlakyStorage {
    inner: Arc<dyn Storage>,
}

impl FlakyStorage {
    pub fn wrap(inner: Arc<dyn Storage>) -> Arc<dyn Storage> {
        Arc::new(Self { inner })
    }
}

#[async_trait]
impl Storage for FlakyStorage {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<String> {
        if key.ends_with(&format!("-{}", BROKEN_FILENAME)) {
            return Err(StorageError::WriteFailed {
                key: key.to_string(),
                source: "connection reset by peer".into(),
            });
        }
        self.inner.put(key, content_type, data).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.inner.delete(key).await
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }
}
