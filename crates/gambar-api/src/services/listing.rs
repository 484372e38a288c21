//! Registration, edit and image-attach workflow.
//!
//! Validation failures are recovered here and handed back as form state; every
//! other failure propagates to the request boundary as an `AppError`.

use std::sync::Arc;

use bytes::Bytes;
use gambar_core::models::{ImageUpdate, Photographer, PhotographerForm};
use gambar_core::validation::validate_listing;
use gambar_core::{AppError, EditToken, TokenHash};
use gambar_db::PhotographerRepository;
use gambar_storage::{ImageUploader, StoredImage};

use crate::error::storage_error;
use crate::views::FormState;

/// Outcome of a form submission.
#[derive(Debug)]
pub enum Submission<T> {
    /// Re-display the form with these values and messages. Nothing was persisted.
    Invalid(FormState),
    Accepted(T),
}

/// A freshly created listing and the only copy of its edit token.
#[derive(Debug)]
pub struct Registered {
    pub photographer: Photographer,
    pub edit_token: EditToken,
}

/// One uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub filename: String,
    pub data: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct ImagePayloads {
    pub avatar: Option<ImageFile>,
    pub cover: Option<ImageFile>,
}

impl ImagePayloads {
    pub fn is_empty(&self) -> bool {
        self.avatar.is_none() && self.cover.is_none()
    }
}

fn unknown_token() -> AppError {
    AppError::NotFound("No listing matches this edit link".to_string())
}

fn unknown_photographer(id: i64) -> AppError {
    AppError::NotFound(format!("Photographer {} not found", id))
}

#[derive(Clone)]
pub struct ListingService {
    repository: Arc<dyn PhotographerRepository>,
    uploader: ImageUploader,
}

impl ListingService {
    pub fn new(repository: Arc<dyn PhotographerRepository>, uploader: ImageUploader) -> Self {
        Self {
            repository,
            uploader,
        }
    }

    /// Create a listing from a submitted form.
    #[tracing::instrument(skip_all, fields(operation = "register"))]
    pub async fn register(
        &self,
        form: PhotographerForm,
    ) -> Result<Submission<Registered>, AppError> {
        let listing = match validate_listing(&form) {
            Ok(listing) => listing,
            Err(errors) => {
                tracing::debug!(violations = errors.len(), "Registration rejected");
                return Ok(Submission::Invalid(FormState::with_errors(form, errors)));
            }
        };

        let edit_token =
            EditToken::generate().map_err(|e| AppError::Internal(e.to_string()))?;
        let photographer = self.repository.insert(&listing, &edit_token.hash()).await?;

        tracing::info!(photographer_id = photographer.id, "Listing created");

        Ok(Submission::Accepted(Registered {
            photographer,
            edit_token,
        }))
    }

    async fn resolve_token(&self, token: &str) -> Result<(TokenHash, Photographer), AppError> {
        let hash = TokenHash::from_presented(token).ok_or_else(unknown_token)?;
        let photographer = self
            .repository
            .get_by_token(&hash)
            .await?
            .ok_or_else(unknown_token)?;
        Ok((hash, photographer))
    }

    /// Pre-filled form for the listing owning `token`.
    #[tracing::instrument(skip_all, fields(operation = "load_for_edit"))]
    pub async fn load_for_edit(&self, token: &str) -> Result<FormState, AppError> {
        let (_, photographer) = self.resolve_token(token).await?;
        Ok(FormState::new(PhotographerForm::from(&photographer)))
    }

    /// Replace the text fields of the listing owning `token`.
    ///
    /// Accepted carries the id of the updated listing.
    #[tracing::instrument(skip_all, fields(operation = "edit"))]
    pub async fn edit(
        &self,
        token: &str,
        form: PhotographerForm,
    ) -> Result<Submission<i64>, AppError> {
        let listing = match validate_listing(&form) {
            Ok(listing) => listing,
            Err(errors) => return Ok(Submission::Invalid(FormState::with_errors(form, errors))),
        };

        let (hash, _) = self.resolve_token(token).await?;
        let id = self
            .repository
            .update(&hash, &listing)
            .await?
            .ok_or_else(unknown_token)?;

        tracing::info!(photographer_id = id, "Listing updated");

        Ok(Submission::Accepted(id))
    }

    /// Upload the supplied images and attach them to a listing.
    ///
    /// The avatar is written before the cover and a failure stops the sequence.
    /// Slots with no payload keep whatever URL they had. Objects written by this
    /// call are removed again if a later step fails.
    #[tracing::instrument(skip(self, images), fields(operation = "attach_images"))]
    pub async fn attach_images(
        &self,
        id: i64,
        images: ImagePayloads,
    ) -> Result<Photographer, AppError> {
        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| unknown_photographer(id))?;

        if images.is_empty() {
            return Ok(existing);
        }

        let mut stored: Vec<StoredImage> = Vec::new();
        let mut update = ImageUpdate::default();

        if let Some(avatar) = images.avatar {
            let image = self.upload(&avatar, &stored).await?;
            update.avatar_url = Some(image.url.clone());
            stored.push(image);
        }

        if let Some(cover) = images.cover {
            let image = self.upload(&cover, &stored).await?;
            update.cover_url = Some(image.url.clone());
            stored.push(image);
        }

        match self.repository.update_images(id, &update).await {
            Ok(Some(photographer)) => {
                tracing::info!(
                    photographer_id = id,
                    avatar = update.avatar_url.is_some(),
                    cover = update.cover_url.is_some(),
                    "Images attached"
                );
                Ok(photographer)
            }
            Ok(None) => {
                self.discard_all(&stored).await;
                Err(unknown_photographer(id))
            }
            Err(e) => {
                self.discard_all(&stored).await;
                Err(e)
            }
        }
    }

    async fn upload(
        &self,
        file: &ImageFile,
        earlier: &[StoredImage],
    ) -> Result<StoredImage, AppError> {
        match self.uploader.upload(&file.filename, file.data.clone()).await {
            Ok(image) => Ok(image),
            Err(e) => {
                self.discard_all(earlier).await;
                Err(storage_error(e))
            }
        }
    }

    async fn discard_all(&self, images: &[StoredImage]) {
        for image in images {
            self.uploader.discard(image).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gambar_db::InMemoryPhotographerRepository;
    use gambar_storage::LocalStorage;

    async fn service(dir: &std::path::Path) -> (ListingService, InMemoryPhotographerRepository) {
        let repository = InMemoryPhotographerRepository::new();
        let storage = LocalStorage::new(dir, "https://img.example.com".to_string())
            .await
            .unwrap();
        let service = ListingService::new(
            Arc::new(repository.clone()),
            ImageUploader::new(Arc::new(storage)),
        );
        (service, repository)
    }

    fn form() -> PhotographerForm {
        PhotographerForm {
            name: "Amir".to_string(),
            specialty: "Wedding".to_string(),
            city: "Kuala Lumpur".to_string(),
            whatsapp: "+60123456789".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_register_stores_token_hash() {
        let dir = tempfile::tempdir().unwrap();
        let (service, repository) = service(dir.path()).await;

        let Submission::Accepted(registered) = service.register(form()).await.unwrap() else {
            panic!("expected registration to succeed");
        };

        assert_eq!(
            repository.token_hash_of(registered.photographer.id),
            Some(registered.edit_token.hash())
        );
    }

    #[tokio::test]
    async fn test_invalid_edit_is_reported_before_token_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _) = service(dir.path()).await;

        let blank = PhotographerForm::default();
        let result = service.edit("unknown", blank).await.unwrap();

        assert!(matches!(result, Submission::Invalid(state) if !state.is_valid()));
    }

    #[tokio::test]
    async fn test_attach_nothing_returns_listing_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _) = service(dir.path()).await;
        let Submission::Accepted(registered) = service.register(form()).await.unwrap() else {
            panic!("expected registration to succeed");
        };

        let photographer = service
            .attach_images(registered.photographer.id, ImagePayloads::default())
            .await
            .unwrap();

        assert_eq!(photographer.updated_at, registered.photographer.updated_at);
    }

    #[tokio::test]
    async fn test_attach_to_missing_listing() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _) = service(dir.path()).await;

        let err = service
            .attach_images(7, ImagePayloads::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
