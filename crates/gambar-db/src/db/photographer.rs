use async_trait::async_trait;
use gambar_core::models::{ImageUpdate, NewPhotographer, Photographer};
use gambar_core::{AppError, TokenHash};
use sqlx::{PgPool, Postgres};

const PHOTOGRAPHER_COLUMNS: &str = "id, name, specialty, city, bio, email, whatsapp, website, \
     avatar_url, cover_url, created_at, updated_at";

/// Storage of photographer listings.
///
/// Lookups return `Ok(None)` for a missing record; turning that into a 404 is
/// the caller's business.
#[async_trait]
pub trait PhotographerRepository: Send + Sync {
    /// Persist a new listing. The store assigns the id.
    async fn insert(
        &self,
        listing: &NewPhotographer,
        token_hash: &TokenHash,
    ) -> Result<Photographer, AppError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Photographer>, AppError>;

    async fn get_by_token(&self, token_hash: &TokenHash) -> Result<Option<Photographer>, AppError>;

    /// Overwrite the text fields of the listing owning `token_hash`.
    ///
    /// Returns the id of the updated record, or `None` if no record matches.
    /// Images, id and token are never touched.
    async fn update(
        &self,
        token_hash: &TokenHash,
        listing: &NewPhotographer,
    ) -> Result<Option<i64>, AppError>;

    /// Attach image URLs. Slots left as `None` keep their stored value.
    async fn update_images(
        &self,
        id: i64,
        images: &ImageUpdate,
    ) -> Result<Option<Photographer>, AppError>;

    /// All listings, oldest first.
    async fn list(&self) -> Result<Vec<Photographer>, AppError>;

    /// Cheap round trip to the backing store, for health checks.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Postgres-backed repository for photographers
#[derive(Clone)]
pub struct PgPhotographerRepository {
    pool: PgPool,
}

impl PgPhotographerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotographerRepository for PgPhotographerRepository {
    #[tracing::instrument(skip(self, listing, token_hash), fields(db.table = "photographers", db.operation = "insert"))]
    async fn insert(
        &self,
        listing: &NewPhotographer,
        token_hash: &TokenHash,
    ) -> Result<Photographer, AppError> {
        let photographer = sqlx::query_as::<Postgres, Photographer>(&format!(
            r#"
            INSERT INTO photographers
                (name, specialty, city, bio, email, whatsapp, website, edit_token_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            PHOTOGRAPHER_COLUMNS
        ))
        .bind(&listing.name)
        .bind(&listing.specialty)
        .bind(&listing.city)
        .bind(&listing.bio)
        .bind(&listing.email)
        .bind(&listing.whatsapp)
        .bind(&listing.website)
        .bind(token_hash.as_str())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(photographer_id = photographer.id, "Photographer registered");

        Ok(photographer)
    }

    #[tracing::instrument(skip(self), fields(db.table = "photographers", db.operation = "select", db.record_id = %id))]
    async fn get_by_id(&self, id: i64) -> Result<Option<Photographer>, AppError> {
        let photographer = sqlx::query_as::<Postgres, Photographer>(&format!(
            "SELECT {} FROM photographers WHERE id = $1",
            PHOTOGRAPHER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(photographer)
    }

    #[tracing::instrument(skip(self, token_hash), fields(db.table = "photographers", db.operation = "select"))]
    async fn get_by_token(&self, token_hash: &TokenHash) -> Result<Option<Photographer>, AppError> {
        let photographer = sqlx::query_as::<Postgres, Photographer>(&format!(
            "SELECT {} FROM photographers WHERE edit_token_hash = $1",
            PHOTOGRAPHER_COLUMNS
        ))
        .bind(token_hash.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(photographer)
    }

    #[tracing::instrument(skip(self, token_hash, listing), fields(db.table = "photographers", db.operation = "update"))]
    async fn update(
        &self,
        token_hash: &TokenHash,
        listing: &NewPhotographer,
    ) -> Result<Option<i64>, AppError> {
        let id = sqlx::query_scalar::<Postgres, i64>(
            r#"
            UPDATE photographers
            SET name = $1, specialty = $2, city = $3, bio = $4,
                email = $5, whatsapp = $6, website = $7, updated_at = NOW()
            WHERE edit_token_hash = $8
            RETURNING id
            "#,
        )
        .bind(&listing.name)
        .bind(&listing.specialty)
        .bind(&listing.city)
        .bind(&listing.bio)
        .bind(&listing.email)
        .bind(&listing.whatsapp)
        .bind(&listing.website)
        .bind(token_hash.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(skip(self, images), fields(db.table = "photographers", db.operation = "update", db.record_id = %id))]
    async fn update_images(
        &self,
        id: i64,
        images: &ImageUpdate,
    ) -> Result<Option<Photographer>, AppError> {
        let photographer = sqlx::query_as::<Postgres, Photographer>(&format!(
            r#"
            UPDATE photographers
            SET avatar_url = COALESCE($2, avatar_url),
                cover_url = COALESCE($3, cover_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PHOTOGRAPHER_COLUMNS
        ))
        .bind(id)
        .bind(&images.avatar_url)
        .bind(&images.cover_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(photographer)
    }

    #[tracing::instrument(skip(self), fields(db.table = "photographers", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Photographer>, AppError> {
        let photographers = sqlx::query_as::<Postgres, Photographer>(&format!(
            "SELECT {} FROM photographers ORDER BY id ASC",
            PHOTOGRAPHER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(photographers)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
