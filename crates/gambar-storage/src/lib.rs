//! Gambar Storage Library
//!
//! Object storage for photographer images: the `Storage` trait, its S3 (Cloudflare
//! R2) and local filesystem implementations, and the `ImageUploader` that turns a
//! submitted file into a public URL.
//!
//! # Storage key format
//!
//! Keys are flat: `{unix_nanos}-{sanitized_basename}`, drawn from `[A-Za-z0-9._-]`.
//! Key generation is centralized in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;
pub mod uploader;

// Re-export commonly used types
pub use factory::create_storage;
pub use gambar_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use uploader::{ImageUploader, StoredImage};
