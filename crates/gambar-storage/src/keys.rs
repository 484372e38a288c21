//! Shared key generation for storage backends.
//!
//! Key format: `{unix_nanos}-{sanitized_basename}`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Accepted image extensions and the content type each is stored with.
const ALLOWED_EXTENSIONS: [(&str, &str); 4] = [
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
];

/// Strip any directory component, with either separator.
pub fn basename(filename: &str) -> &str {
    filename.rsplit(['/', '\\']).next().unwrap_or(filename)
}

/// Content type for a filename, or `None` when the extension is not allowed.
///
/// The extension is whatever follows the last `.` of the basename, compared
/// case-insensitively.
pub fn content_type_for(filename: &str) -> Option<&'static str> {
    let (_, ext) = basename(filename).rsplit_once('.')?;
    ALLOWED_EXTENSIONS
        .iter()
        .find(|(allowed, _)| ext.eq_ignore_ascii_case(allowed))
        .map(|(_, content_type)| *content_type)
}

/// Basename with spaces turned into hyphens and anything else outside
/// `[A-Za-z0-9._-]` replaced by `_`.
pub fn sanitize_filename(filename: &str) -> String {
    basename(filename)
        .chars()
        .map(|c| match c {
            ' ' => '-',
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') => c,
            _ => '_',
        })
        .collect()
}

static LAST_NANOS: AtomicU64 = AtomicU64::new(0);

/// Current unix time in nanoseconds, strictly increasing within the process.
fn unique_nanos() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let mut prev = LAST_NANOS.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST_NANOS.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}

/// Build a storage key from a timestamp and the submitted filename.
pub fn storage_key_at(unix_nanos: u64, filename: &str) -> String {
    format!("{}-{}", unix_nanos, sanitize_filename(filename))
}

/// Generate a fresh storage key for the submitted filename.
pub fn generate_storage_key(filename: &str) -> String {
    storage_key_at(unique_nanos(), filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_is_case_insensitive() {
        assert_eq!(content_type_for("My Photo.PNG"), Some("image/png"));
        assert_eq!(content_type_for("a.JpEg"), Some("image/jpeg"));
        assert_eq!(content_type_for("a.jpg"), Some("image/jpeg"));
        assert_eq!(content_type_for("cover.webp"), Some("image/webp"));
    }

    #[test]
    fn test_disallowed_extensions() {
        assert_eq!(content_type_for("photo.gif"), None);
        assert_eq!(content_type_for("photo"), None);
        assert_eq!(content_type_for("photo.png.exe"), None);
        // The dot in the directory does not count as an extension.
        assert_eq!(content_type_for("shots.png/photo"), None);
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("My Photo.PNG"), "My-Photo.PNG");
        assert_eq!(sanitize_filename("../../etc/passwd.png"), "passwd.png");
        assert_eq!(sanitize_filename("C:\\Users\\amir\\wed ding.jpg"), "wed-ding.jpg");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("café?#1.jpg"), "caf___1.jpg");
        assert_eq!(sanitize_filename("a%20b.png"), "a_20b.png");
    }

    #[test]
    fn test_storage_key_format() {
        assert_eq!(
            storage_key_at(1700000000000000000, "My Photo.PNG"),
            "1700000000000000000-My-Photo.PNG"
        );
        let key = generate_storage_key("x.png");
        let (nanos, rest) = key.split_once('-').unwrap();
        assert!(nanos.parse::<u64>().unwrap() > 0);
        assert_eq!(rest, "x.png");
    }

    #[test]
    fn test_keys_never_repeat() {
        let keys: std::collections::HashSet<_> =
            (0..1000).map(|_| generate_storage_key("same.png")).collect();
        assert_eq!(keys.len(), 1000);
    }
}
