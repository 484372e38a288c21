use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A listed photographer as read back from the store.
///
/// The edit token hash is deliberately not part of the read model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Photographer {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub city: String,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated, trimmed listing fields ready to be written.
///
/// Only `validation::validate_listing` builds one, so holding a value means
/// the required fields are non-empty and at least one contact is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhotographer {
    pub name: String,
    pub specialty: String,
    pub city: String,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub website: Option<String>,
}

/// Image URLs to attach. A `None` slot leaves the stored URL untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUpdate {
    pub avatar_url: Option<String>,
    pub cover_url: Option<String>,
}

/// Raw registration/edit form as submitted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PhotographerForm {
    pub name: String,
    pub specialty: String,
    pub city: String,
    pub bio: String,
    pub email: String,
    pub whatsapp: String,
    pub website: String,
}

impl From<&Photographer> for PhotographerForm {
    fn from(p: &Photographer) -> Self {
        PhotographerForm {
            name: p.name.clone(),
            specialty: p.specialty.clone(),
            city: p.city.clone(),
            bio: p.bio.clone().unwrap_or_default(),
            email: p.email.clone().unwrap_or_default(),
            whatsapp: p.whatsapp.clone().unwrap_or_default(),
            website: p.website.clone().unwrap_or_default(),
        }
    }
}
