use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use gambar_core::constants::{AVATAR_FIELD, COVER_FIELD};
use gambar_core::AppError;

use crate::error::{multipart_error, ErrorResponse, HttpAppError};
use crate::handlers::directory::parse_id;
use crate::services::{ImageFile, ImagePayloads};
use crate::state::AppState;
use crate::views::profile_path;

/// Read the whole multipart body before anything is uploaded, so an oversized
/// request fails without leaving objects behind.
async fn read_image_fields(
    mut multipart: Multipart,
    max_upload_size_bytes: usize,
) -> Result<ImagePayloads, AppError> {
    let mut payloads = ImagePayloads::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_upload_size_bytes))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let slot = match name.as_str() {
            AVATAR_FIELD => &mut payloads.avatar,
            COVER_FIELD => &mut payloads.cover,
            _ => continue,
        };

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_upload_size_bytes))?;

        // Browsers submit an empty part for a file input left blank.
        if filename.is_empty() && data.is_empty() {
            continue;
        }

        *slot = Some(ImageFile { filename, data });
    }

    Ok(payloads)
}

/// Attach avatar and/or cover images to a listing
///
/// Fields: `avatar`, `cover`. Either may be omitted, in which case the stored
/// image for that slot is kept. Redirects to the profile on success.
#[utoipa::path(
    post,
    path = "/photos/{id}",
    tag = "listing",
    params(
        ("id" = i64, Path, description = "Photographer id")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Images attached; redirect to the profile"),
        (status = 400, description = "Malformed id, body or unsupported file type", body = ErrorResponse),
        (status = 404, description = "No such photographer", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_photos(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let id = parse_id(&id)?;
    let payloads = read_image_fields(multipart, state.config.max_upload_size_bytes).await?;

    let photographer = state.listings.attach_images(id, payloads).await?;

    Ok(Redirect::to(&profile_path(photographer.id)).into_response())
}
