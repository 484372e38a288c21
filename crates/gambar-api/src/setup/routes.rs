//! Route configuration and setup

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, MatchedPath, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use gambar_core::Config;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::error::{payload_too_large, HttpAppError};
use crate::handlers;
use crate::state::AppState;

/// Build the application router.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Server-level cap on in-flight requests
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);

    let pages = Router::new()
        .route("/", get(handlers::directory::list_photographers))
        .route(
            "/photographer/{id}",
            get(handlers::directory::get_photographer),
        )
        .route(
            "/join",
            get(handlers::join::join_form).post(handlers::join::submit_join),
        )
        .route(
            "/edit/{token}",
            get(handlers::edit::edit_form).post(handlers::edit::submit_edit),
        )
        .route(
            "/photos/{id}",
            axum::routing::post(handlers::photos::upload_photos),
        )
        .route("/health", get(handlers::health::health_check))
        .with_state(state);

    let app = pages
        .route(
            "/api/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        // One limit for the whole request body, enforced before any field is read.
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes))
        .layer(middleware::from_fn_with_state(
            config.max_upload_size_bytes,
            payload_too_large_as_json,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(request_span));

    Ok(app)
}

/// Path recorded on request spans.
///
/// The route template when one matched, so `/edit/{token}` never carries a
/// real token into the logs. Unmatched edit paths are collapsed the same way.
fn span_path(request: &Request<Body>) -> String {
    if let Some(matched) = request.extensions().get::<MatchedPath>() {
        return matched.as_str().to_string();
    }
    let path = request.uri().path();
    if path.starts_with("/edit/") {
        "/edit/{token}".to_string()
    } else {
        path.to_string()
    }
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %span_path(request),
        version = ?request.version(),
    )
}

/// Body-limit rejections from `RequestBodyLimitLayer` come back as plain text;
/// give them the same JSON shape as every other error.
async fn payload_too_large_as_json(
    State(max_upload_size_bytes): State<usize>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));

    if response.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_json {
        return HttpAppError(payload_too_large(max_upload_size_bytes)).into_response();
    }
    response
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        if config.is_production() {
            return Err(anyhow::anyhow!(
                "CORS cannot allow all origins in production"
            ));
        }
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
