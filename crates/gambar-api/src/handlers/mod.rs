//! HTTP handlers, one module per page.

pub mod directory;
pub mod edit;
pub mod health;
pub mod join;
pub mod photos;
