//! Application setup and initialization
//!
//! Everything `main` needs to go from a loaded `Config` to a serving router.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use anyhow::{Context, Result};
use gambar_core::Config;
use gambar_db::PgPhotographerRepository;

use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    validation::validate_config(&config).context("Configuration validation failed")?;
    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let repository = Arc::new(PgPhotographerRepository::new(pool));
    let state = Arc::new(AppState::new(config.clone(), repository, storage));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
