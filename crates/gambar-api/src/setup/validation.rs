//! Startup checks beyond what `Config::validate` covers.

use anyhow::Result;
use gambar_core::token::ensure_entropy_available;
use gambar_core::Config;

/// Fail fast on anything that would only surface on the first request.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    // Registration cannot work without a secure random source.
    ensure_entropy_available()
        .map_err(|e| anyhow::anyhow!("Secure random source unavailable: {}", e))?;

    if config.is_production() && config.storage_backend == gambar_core::StorageBackend::Local {
        tracing::warn!("Local image storage in production - images will not survive a redeploy");
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}
