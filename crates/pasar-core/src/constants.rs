//! Shared constants for the upload boundary.

/// Maximum accepted upload size in bytes (5 MiB). A declared size of exactly
/// this value is accepted; one byte more is rejected.
pub const MAX_UPLOAD_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Content types accepted by the upload validator. `image/jpg` is not a real
/// MIME type but some clients send it, so it stays on the allowlist.
pub const ALLOWED_IMAGE_CONTENT_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// File extensions accepted by the upload validator (lower-cased, no dot).
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Default limit for the client-side convenience pre-check (2 MiB). The
/// server-side validator is the authoritative gate.
pub const CLIENT_PRECHECK_MAX_BYTES: u64 = 2 * 1024 * 1024;

/// Top-level directory under the public root where all buckets live.
/// Stored file references always start with this prefix.
pub const UPLOADS_PREFIX: &str = "uploads";

/// Sanitized base names are truncated to this many characters before the
/// timestamp suffix is appended.
pub const MAX_BASENAME_LENGTH: usize = 100;

/// Length of the random token substituted when a base name sanitizes away
/// to nothing.
pub const FALLBACK_TOKEN_LENGTH: usize = 10;
