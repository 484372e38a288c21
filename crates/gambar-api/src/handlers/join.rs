use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gambar_core::models::PhotographerForm;

use crate::error::{ErrorResponse, HttpAppError, ValidatedForm};
use crate::services::{Registered, Submission};
use crate::state::AppState;
use crate::views::{edit_path, photos_path, FormState, RegisteredView};

/// Empty registration form
#[utoipa::path(
    get,
    path = "/join",
    tag = "listing",
    responses(
        (status = 200, description = "Blank form", body = FormState)
    )
)]
pub async fn join_form() -> Json<FormState> {
    Json(FormState::default())
}

/// Register a new photographer
///
/// Answers 201 with the edit token on success. A form with violations comes
/// back as 200 with the submitted values and messages.
#[utoipa::path(
    post,
    path = "/join",
    tag = "listing",
    request_body(content = PhotographerForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Listing created; the edit token is shown only here", body = RegisteredView),
        (status = 200, description = "Form rejected with validation messages", body = FormState),
        (status = 400, description = "Malformed form body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, form))]
pub async fn submit_join(
    State(state): State<Arc<AppState>>,
    ValidatedForm(form): ValidatedForm<PhotographerForm>,
) -> Result<Response, HttpAppError> {
    match state.listings.register(form).await? {
        Submission::Invalid(form_state) => Ok((StatusCode::OK, Json(form_state)).into_response()),
        Submission::Accepted(Registered {
            photographer,
            edit_token,
        }) => {
            let view = RegisteredView {
                edit_url: edit_path(edit_token.as_str()),
                photos_url: photos_path(photographer.id),
                edit_token: edit_token.into_string(),
                photographer,
            };
            Ok((StatusCode::CREATED, Json(view)).into_response())
        }
    }
}
