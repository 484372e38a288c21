//! In-memory repository for testing without a database

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use gambar_core::models::{ImageUpdate, NewPhotographer, Photographer};
use gambar_core::{AppError, TokenHash};

use super::PhotographerRepository;

#[derive(Default)]
struct Store {
    next_id: i64,
    rows: BTreeMap<i64, (Photographer, TokenHash)>,
}

/// Photographer repository kept in process memory.
///
/// `fail_writes(true)` makes every mutating call fail with a database error,
/// for exercising failure paths.
#[derive(Clone, Default)]
pub struct InMemoryPhotographerRepository {
    store: Arc<Mutex<Store>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryPhotographerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored listings.
    pub fn len(&self) -> usize {
        self.lock().map(|s| s.rows.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored token hash for a listing.
    pub fn token_hash_of(&self, id: i64) -> Option<TokenHash> {
        self.lock()
            .ok()
            .and_then(|s| s.rows.get(&id).map(|(_, hash)| hash.clone()))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, AppError> {
        self.store
            .lock()
            .map_err(|_| AppError::Internal("in-memory store poisoned".to_string()))
    }

    fn check_writable(&self) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl PhotographerRepository for InMemoryPhotographerRepository {
    async fn insert(
        &self,
        listing: &NewPhotographer,
        token_hash: &TokenHash,
    ) -> Result<Photographer, AppError> {
        self.check_writable()?;
        let mut store = self.lock()?;
        if store.rows.values().any(|(_, hash)| hash == token_hash) {
            return Err(AppError::Internal("duplicate edit token hash".to_string()));
        }

        store.next_id += 1;
        let now = Utc::now();
        let photographer = Photographer {
            id: store.next_id,
            name: listing.name.clone(),
            specialty: listing.specialty.clone(),
            city: listing.city.clone(),
            bio: listing.bio.clone(),
            email: listing.email.clone(),
            whatsapp: listing.whatsapp.clone(),
            website: listing.website.clone(),
            avatar_url: None,
            cover_url: None,
            created_at: now,
            updated_at: now,
        };
        store
            .rows
            .insert(photographer.id, (photographer.clone(), token_hash.clone()));

        Ok(photographer)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Photographer>, AppError> {
        Ok(self.lock()?.rows.get(&id).map(|(p, _)| p.clone()))
    }

    async fn get_by_token(&self, token_hash: &TokenHash) -> Result<Option<Photographer>, AppError> {
        Ok(self
            .lock()?
            .rows
            .values()
            .find(|(_, hash)| hash == token_hash)
            .map(|(p, _)| p.clone()))
    }

    async fn update(
        &self,
        token_hash: &TokenHash,
        listing: &NewPhotographer,
    ) -> Result<Option<i64>, AppError> {
        self.check_writable()?;
        let mut store = self.lock()?;
        let Some((p, _)) = store.rows.values_mut().find(|(_, hash)| hash == token_hash) else {
            return Ok(None);
        };

        p.name = listing.name.clone();
        p.specialty = listing.specialty.clone();
        p.city = listing.city.clone();
        p.bio = listing.bio.clone();
        p.email = listing.email.clone();
        p.whatsapp = listing.whatsapp.clone();
        p.website = listing.website.clone();
        p.updated_at = Utc::now();

        Ok(Some(p.id))
    }

    async fn update_images(
        &self,
        id: i64,
        images: &ImageUpdate,
    ) -> Result<Option<Photographer>, AppError> {
        self.check_writable()?;
        let mut store = self.lock()?;
        let Some((p, _)) = store.rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(url) = &images.avatar_url {
            p.avatar_url = Some(url.clone());
        }
        if let Some(url) = &images.cover_url {
            p.cover_url = Some(url.clone());
        }
        p.updated_at = Utc::now();

        Ok(Some(p.clone()))
    }

    async fn list(&self) -> Result<Vec<Photographer>, AppError> {
        Ok(self.lock()?.rows.values().map(|(p, _)| p.clone()).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}
