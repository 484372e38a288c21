//! Gambar API library
//!
//! HTTP handlers, page views and application setup for the photographer directory.

mod api_doc;
mod handlers;
mod telemetry;

pub mod error;
pub mod services;
pub mod setup;
pub mod state;
pub mod views;

pub use api_doc::ApiDoc;
pub use error::ErrorResponse;
pub use state::AppState;
