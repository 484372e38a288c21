//! Storage setup and initialization

use std::sync::Arc;

use anyhow::{Context, Result};
use gambar_core::Config;
use gambar_storage::{create_storage, Storage};

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing image storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize image storage")?;
    tracing::info!(
        backend = ?storage.backend_type(),
        max_upload_mb = config.max_upload_size_bytes / 1024 / 1024,
        "Image storage initialized"
    );
    Ok(storage)
}
