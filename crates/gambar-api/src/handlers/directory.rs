use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use gambar_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::views::{DirectoryView, ProfileView};

/// Parse a photographer id from the path. Anything but an integer is a 400.
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("Invalid photographer id: {}", raw)))
}

/// Directory of all photographers
#[utoipa::path(
    get,
    path = "/",
    tag = "directory",
    responses(
        (status = 200, description = "All listings in registration order", body = DirectoryView),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_photographers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DirectoryView>, HttpAppError> {
    let photographers = state.repository.list().await?;
    Ok(Json(DirectoryView { photographers }))
}

/// Public profile of one photographer
#[utoipa::path(
    get,
    path = "/photographer/{id}",
    tag = "directory",
    params(
        ("id" = i64, Path, description = "Photographer id")
    ),
    responses(
        (status = 200, description = "Profile found", body = ProfileView),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No such photographer", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_photographer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProfileView>, HttpAppError> {
    let id = parse_id(&id)?;
    let photographer = state
        .repository
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Photographer {} not found", id)))?;

    Ok(Json(ProfileView { photographer }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id("1.5"), Err(AppError::BadRequest(_))));
    }
}
