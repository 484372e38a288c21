#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use gambar_core::Config;
use std::sync::Arc;

fn required(value: &Option<String>, name: &str) -> StorageResult<String> {
    value
        .clone()
        .ok_or_else(|| StorageError::ConfigError(format!("{} not configured", name)))
}

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let endpoint = config.r2_endpoint().ok_or_else(|| {
                StorageError::ConfigError("R2_ACCOUNT_ID not configured".to_string())
            })?;
            let storage = S3Storage::new(
                endpoint,
                required(&config.r2_bucket_name, "R2_BUCKET_NAME")?,
                required(&config.r2_access_key_id, "R2_ACCESS_KEY_ID")?,
                required(&config.r2_secret_access_key, "R2_SECRET_ACCESS_KEY")?,
                required(&config.r2_public_url, "R2_PUBLIC_URL")?,
            )?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = required(&config.local_storage_path, "LOCAL_STORAGE_PATH")?;
            let base_url = required(&config.local_storage_base_url, "LOCAL_STORAGE_BASE_URL")?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
