//! Application services

pub mod listing;

pub use listing::{ImageFile, ImagePayloads, ListingService, Registered, Submission};
