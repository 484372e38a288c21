//! OpenAPI documentation, served at `/api/openapi.json` and browsable at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::views;
use gambar_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gambar API",
        version = "0.1.0",
        description = "Photographer directory. Photographers list themselves without an account and keep a private edit link to change their listing later."
    ),
    paths(
        handlers::directory::list_photographers,
        handlers::directory::get_photographer,
        handlers::join::join_form,
        handlers::join::submit_join,
        handlers::edit::edit_form,
        handlers::edit::submit_edit,
        handlers::photos::upload_photos,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::Photographer,
            models::PhotographerForm,
            views::DirectoryView,
            views::ProfileView,
            views::RegisteredView,
            views::FormState,
            handlers::health::HealthCheckResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "directory", description = "Public directory and profile pages"),
        (name = "listing", description = "Registration, editing and image upload"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_page() {
        let spec = ApiDoc::openapi();
        for path in [
            "/",
            "/photographer/{id}",
            "/join",
            "/edit/{token}",
            "/photos/{id}",
            "/health",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
