//! Gambar Database Library
//!
//! Persistence for photographer listings.

pub mod db;

pub use db::{PgPhotographerRepository, PhotographerRepository};
#[cfg(any(test, feature = "test-helpers"))]
pub use db::InMemoryPhotographerRepository;
