use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use gambar_core::models::PhotographerForm;

use crate::error::{ErrorResponse, HttpAppError, ValidatedForm};
use crate::services::Submission;
use crate::state::AppState;
use crate::views::{profile_path, FormState};

/// Edit form pre-filled with the current listing
#[utoipa::path(
    get,
    path = "/edit/{token}",
    tag = "listing",
    params(
        ("token" = String, Path, description = "Edit token handed out at registration")
    ),
    responses(
        (status = 200, description = "Current values", body = FormState),
        (status = 404, description = "Unknown token", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Json<FormState>, HttpAppError> {
    let form_state = state.listings.load_for_edit(&token).await?;
    Ok(Json(form_state))
}

/// Update a listing
///
/// Redirects to the profile on success. The token is the only credential.
#[utoipa::path(
    post,
    path = "/edit/{token}",
    tag = "listing",
    params(
        ("token" = String, Path, description = "Edit token handed out at registration")
    ),
    request_body(content = PhotographerForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirect to the profile"),
        (status = 200, description = "Form rejected with validation messages", body = FormState),
        (status = 404, description = "Unknown token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn submit_edit(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    ValidatedForm(form): ValidatedForm<PhotographerForm>,
) -> Result<Response, HttpAppError> {
    match state.listings.edit(&token, form).await? {
        Submission::Invalid(form_state) => Ok(Json(form_state).into_response()),
        Submission::Accepted(id) => Ok(Redirect::to(&profile_path(id)).into_response()),
    }
}
