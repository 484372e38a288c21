//! Listing form validation
//!
//! Every violation is collected, never just the first, and messages come back
//! in a fixed order: name, specialty, city, then contact.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{NewPhotographer, PhotographerForm};

pub const NAME_REQUIRED: &str = "Name is required";
pub const SPECIALTY_REQUIRED: &str = "Specialty is required";
pub const CITY_REQUIRED: &str = "City is required";
pub const CONTACT_REQUIRED: &str = "Email or WhatsApp is required";

// Field order in which messages are reported. Struct-level errors land under
// "__all__" and are reported last.
const FIELD_ORDER: [&str; 4] = ["name", "specialty", "city", "__all__"];

#[derive(Debug, Validate)]
#[validate(schema(function = "validate_contact", skip_on_field_errors = false))]
struct ListingInput {
    #[validate(length(min = 1, message = "Name is required"))]
    name: String,
    #[validate(length(min = 1, message = "Specialty is required"))]
    specialty: String,
    #[validate(length(min = 1, message = "City is required"))]
    city: String,
    bio: String,
    email: String,
    whatsapp: String,
    website: String,
}

fn validate_contact(input: &ListingInput) -> Result<(), ValidationError> {
    if input.email.is_empty() && input.whatsapp.is_empty() {
        let mut err = ValidationError::new("contact_required");
        err.message = Some(Cow::Borrowed(CONTACT_REQUIRED));
        return Err(err);
    }
    Ok(())
}

fn optional(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn ordered_messages(errors: &ValidationErrors) -> Vec<String> {
    let by_field = errors.field_errors();
    FIELD_ORDER
        .iter()
        .filter_map(|field| by_field.get(*field))
        .flat_map(|errs| errs.iter())
        .map(|err| {
            err.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string())
        })
        .collect()
}

/// Trim and validate a submitted form.
///
/// Returns the normalized listing, or the ordered violation messages.
/// Optional fields that are blank after trimming become `None`.
pub fn validate_listing(form: &PhotographerForm) -> Result<NewPhotographer, Vec<String>> {
    let input = ListingInput {
        name: form.name.trim().to_string(),
        specialty: form.specialty.trim().to_string(),
        city: form.city.trim().to_string(),
        bio: form.bio.trim().to_string(),
        email: form.email.trim().to_string(),
        whatsapp: form.whatsapp.trim().to_string(),
        website: form.website.trim().to_string(),
    };

    if let Err(errors) = input.validate() {
        return Err(ordered_messages(&errors));
    }

    Ok(NewPhotographer {
        name: input.name,
        specialty: input.specialty,
        city: input.city,
        bio: optional(input.bio),
        email: optional(input.email),
        whatsapp: optional(input.whatsapp),
        website: optional(input.website),
    })
}
