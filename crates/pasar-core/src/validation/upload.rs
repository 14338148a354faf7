//! Server-side upload validation.
//!
//! The validator is the authoritative gate for uploads. Checks run in a fixed
//! order and short-circuit on the first failure, so callers only ever see one
//! error at a time. MIME type and extension are caller-declared metadata; file
//! content is not sniffed here.

use bytes::Bytes;

use crate::constants::{
    ALLOWED_IMAGE_CONTENT_TYPES, ALLOWED_IMAGE_EXTENSIONS, MAX_UPLOAD_SIZE_BYTES,
};
use crate::error::AppError;

/// A submitted file and its declared metadata, decoupled from any web
/// framework's request type. Exists only for the duration of one
/// validate-then-store call.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    /// Raw file payload.
    pub data: Bytes,
    /// Client-declared original filename (e.g. from the multipart header).
    pub original_filename: String,
    /// Client-declared content type.
    pub content_type: String,
    /// Declared size in bytes. Normally `data.len()`, but kept separate so
    /// the validator stays a pure function of declared metadata.
    pub declared_size: u64,
    /// Whether the upload mechanism reported a complete, well-formed transfer.
    pub transport_valid: bool,
}

impl UploadCandidate {
    pub fn new(
        data: Bytes,
        original_filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        let declared_size = data.len() as u64;
        Self {
            data,
            original_filename: original_filename.into(),
            content_type: content_type.into(),
            declared_size,
            transport_valid: true,
        }
    }

    /// Lower-cased extension from the declared filename (empty if none).
    pub fn extension(&self) -> String {
        extension_of(&self.original_filename)
    }
}

/// Size and type limits the validator enforces. Derived from `Config` in
/// production; tests construct it directly.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_size_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_size_bytes: MAX_UPLOAD_SIZE_BYTES,
            allowed_content_types: ALLOWED_IMAGE_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_extensions: ALLOWED_IMAGE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Validate an upload candidate against the policy.
///
/// Checks run in fixed order, short-circuiting on the first failure:
/// transport validity, declared size, content type, extension. The returned
/// messages are user-facing and localized for direct display.
pub fn validate_upload(candidate: &UploadCandidate, policy: &UploadPolicy) -> Result<(), AppError> {
    if !candidate.transport_valid {
        return Err(AppError::InvalidInput(
            "File upload gagal. Silakan coba lagi.".to_string(),
        ));
    }

    if candidate.declared_size > policy.max_size_bytes {
        let max_mb = policy.max_size_bytes / (1024 * 1024);
        return Err(AppError::PayloadTooLarge(format!(
            "Ukuran file terlalu besar. Maksimal {}MB.",
            max_mb
        )));
    }

    let mime = normalize_mime_type(&candidate.content_type);
    if !policy.allowed_content_types.iter().any(|ct| mime == *ct) {
        return Err(AppError::InvalidInput(
            "Tipe file tidak diizinkan. Hanya JPG, PNG, dan WEBP yang diperbolehkan.".to_string(),
        ));
    }

    let extension = candidate.extension();
    if !policy.allowed_extensions.contains(&extension) {
        return Err(AppError::InvalidInput(
            "Ekstensi file tidak valid.".to_string(),
        ));
    }

    Ok(())
}

/// Normalize a MIME type by stripping parameters and lower-casing
/// (e.g. "image/JPEG; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Lower-cased extension after the last dot (empty if there is none).
pub fn extension_of(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, content_type: &str, size: u64) -> UploadCandidate {
        UploadCandidate {
            data: Bytes::new(),
            original_filename: name.to_string(),
            content_type: content_type.to_string(),
            declared_size: size,
            transport_valid: true,
        }
    }

    #[test]
    fn accepts_valid_jpeg() {
        let c = candidate("foto-produk.jpg", "image/jpeg", 1024);
        assert!(validate_upload(&c, &UploadPolicy::default()).is_ok());
    }

    #[test]
    fn rejects_incomplete_transfer() {
        let mut c = candidate("foto.png", "image/png", 1024);
        c.transport_valid = false;
        let err = validate_upload(&c, &UploadPolicy::default()).unwrap_err();
        assert!(err.to_string().contains("coba lagi"));
    }

    #[test]
    fn accepts_exactly_five_mib() {
        let c = candidate("foto.png", "image/png", 5 * 1024 * 1024);
        assert!(validate_upload(&c, &UploadPolicy::default()).is_ok());
    }

    #[test]
    fn rejects_one_byte_over_limit() {
        let c = candidate("foto.png", "image/png", 5 * 1024 * 1024 + 1);
        match validate_upload(&c, &UploadPolicy::default()) {
            Err(AppError::PayloadTooLarge(msg)) => assert!(msg.contains("5MB")),
            other => panic!("expected PayloadTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn rejects_gif_content_type() {
        let c = candidate("anim.gif", "image/gif", 1024);
        match validate_upload(&c, &UploadPolicy::default()) {
            Err(AppError::InvalidInput(msg)) => {
                assert!(msg.contains("JPG"));
                assert!(msg.contains("PNG"));
                assert!(msg.contains("WEBP"));
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn rejects_mismatched_extension() {
        let c = candidate("payload.php", "image/png", 1024);
        let err = validate_upload(&c, &UploadPolicy::default()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Ekstensi file tidak valid.");
    }

    #[test]
    fn size_check_runs_before_content_type_check() {
        // Oversized file with a bad MIME type reports the size error only.
        let c = candidate("big.gif", "image/gif", 6 * 1024 * 1024);
        match validate_upload(&c, &UploadPolicy::default()) {
            Err(AppError::PayloadTooLarge(_)) => {}
            other => panic!("expected PayloadTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn normalizes_mime_parameters_and_case() {
        let c = candidate("foto.jpeg", "image/JPEG; charset=utf-8", 1024);
        assert!(validate_upload(&c, &UploadPolicy::default()).is_ok());
    }

    #[test]
    fn extension_of_handles_edge_cases() {
        assert_eq!(extension_of("a.PNG"), "png");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("no_extension"), "");
    }
}
