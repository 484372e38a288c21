/// Default ceiling for a whole multipart submission (10 MiB).
pub const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 10;

/// Number of random bytes behind an edit token.
pub const EDIT_TOKEN_BYTES: usize = 16;

/// Length of a hex-encoded edit token.
pub const EDIT_TOKEN_LEN: usize = EDIT_TOKEN_BYTES * 2;

/// Multipart field carrying the profile picture.
pub const AVATAR_FIELD: &str = "avatar";

/// Multipart field carrying the cover image.
pub const COVER_FIELD: &str = "cover";
