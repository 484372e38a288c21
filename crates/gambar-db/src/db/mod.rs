//! Database repositories for data access layer
//!
//! `PhotographerRepository` is the seam the API depends on. The Postgres
//! implementation is the production one; the in-memory one backs API tests.

pub mod photographer;
#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;

#[cfg(any(test, feature = "test-helpers"))]
pub use memory::InMemoryPhotographerRepository;
pub use photographer::{PgPhotographerRepository, PhotographerRepository};
