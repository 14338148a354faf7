//! Multipart extraction for upload handlers.

use axum::extract::Multipart;
use bytes::Bytes;
use pasar_core::{AppError, UploadCandidate};

/// Name of the multipart field carrying the image, matching what the
/// frontend submits.
pub const IMAGE_FIELD: &str = "image";

/// Extract the `image` field from a multipart form as an upload candidate.
///
/// Exactly one file field named `image` is accepted; a missing field or a
/// second file field is rejected. A read failure mid-transfer surfaces as
/// the generic retry message, since the client can do nothing more specific
/// about it.
pub async fn extract_image_field(mut multipart: Multipart) -> Result<UploadCandidate, AppError> {
    let mut candidate: Option<UploadCandidate> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == IMAGE_FIELD {
            if candidate.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple image fields are not allowed; send exactly one field named 'image'"
                        .to_string(),
                ));
            }

            let filename = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());

            let data: Bytes = field.bytes().await.map_err(|e| {
                tracing::debug!(error = %e, "Multipart transfer aborted mid-read");
                AppError::InvalidInput("File upload gagal. Silakan coba lagi.".to_string())
            })?;

            candidate = Some(UploadCandidate::new(data, filename, content_type));
        }
    }

    candidate.ok_or_else(|| AppError::InvalidInput("File gambar wajib diupload.".to_string()))
}
