//! Gambar Core Library
//!
//! This crate provides the domain model, error types, configuration, form validation
//! and edit-token primitives shared by the storage, database and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod token;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
pub use token::{EditToken, TokenError, TokenHash};
