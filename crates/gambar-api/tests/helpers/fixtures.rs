//! Form and file fixtures.

use axum_test::multipart::{MultipartForm, Part};

pub fn amir() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Amir Hamzah"),
        ("specialty", "Wedding"),
        ("city", "Kuala Lumpur"),
        ("bio", "Ten years of weddings"),
        ("email", "amir@email.com"),
        ("whatsapp", "+60123456789"),
        ("website", "https://amir.photo"),
    ]
}

/// `amir()` with one field replaced.
pub fn amir_with(field: &str, value: &'static str) -> Vec<(&'static str, &'static str)> {
    amir()
        .into_iter()
        .map(|(k, v)| if k == field { (k, value) } else { (k, v) })
        .collect()
}

/// Smallest valid PNG: 1x1 transparent pixel.
pub fn png_bytes() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

pub fn image_part(filename: &str, data: Vec<u8>) -> Part {
    Part::bytes(bytes::Bytes::from(data))
        .file_name(filename)
        .mime_type("application/octet-stream")
}

pub fn avatar_only(filename: &str) -> MultipartForm {
    MultipartForm::new().add_part("avatar", image_part(filename, png_bytes()))
}

pub fn cover_only(filename: &str) -> MultipartForm {
    MultipartForm::new().add_part("cover", image_part(filename, png_bytes()))
}

pub fn avatar_and_cover(avatar: &str, cover: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part("avatar", image_part(avatar, png_bytes()))
        .add_part("cover", image_part(cover, png_bytes()))
}
