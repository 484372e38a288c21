//! Application state shared by every handler.

use std::sync::Arc;

use gambar_core::Config;
use gambar_db::PhotographerRepository;
use gambar_storage::{ImageUploader, Storage};

use crate::services::ListingService;

/// Built once at startup and handed to the router; there is no global state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repository: Arc<dyn PhotographerRepository>,
    pub listings: ListingService,
}

impl AppState {
    pub fn new(
        config: Config,
        repository: Arc<dyn PhotographerRepository>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        let listings = ListingService::new(repository.clone(), ImageUploader::new(storage));
        Self {
            config,
            repository,
            listings,
        }
    }
}
