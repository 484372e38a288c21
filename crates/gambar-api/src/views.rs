//! Page view models.
//!
//! Pages are delivered as JSON documents; turning them into HTML is left to
//! whatever sits in front of the API.

use gambar_core::models::{Photographer, PhotographerForm};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Every listing, in registration order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DirectoryView {
    pub photographers: Vec<Photographer>,
}

/// One photographer's public profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileView {
    pub photographer: Photographer,
}

/// Shown once after registration. The edit token is never shown again.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisteredView {
    pub photographer: Photographer,
    pub edit_token: String,
    pub edit_url: String,
    pub photos_url: String,
}

/// A registration or edit form, with the values to re-display and any
/// validation messages in reporting order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormState {
    pub values: PhotographerForm,
    pub errors: Vec<String>,
}

impl FormState {
    pub fn new(values: PhotographerForm) -> Self {
        Self {
            values,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(values: PhotographerForm, errors: Vec<String>) -> Self {
        Self { values, errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn profile_path(id: i64) -> String {
    format!("/photographer/{}", id)
}

pub fn edit_path(token: &str) -> String {
    format!("/edit/{}", token)
}

pub fn photos_path(id: i64) -> String {
    format!("/photos/{}", id)
}
