//! Upload and delete handlers
//!
//! The request layer enforces a body limit slightly above the validator's
//! 5 MiB cap (multipart framing overhead) as a first line of defense; the
//! validator in `pasar-core` remains the authoritative gate. Both limits
//! derive from the same config so they cannot drift apart.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::error::HttpAppError;
use crate::multipart::extract_image_field;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Relative reference to persist on the owning record.
    pub path: String,
    /// Fetchable URL for immediate display.
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// Upload an image into a logical bucket (e.g. "produk", "toko").
///
/// Returns HTTP 201 with the stored reference on success. Validation
/// failures render as 400/413 with a user-displayable message.
#[tracing::instrument(skip(state, multipart), fields(bucket = %bucket, operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), HttpAppError> {
    let candidate = extract_image_field(multipart).await?;

    tracing::info!(
        original_filename = %candidate.original_filename,
        content_type = %candidate.content_type,
        size_bytes = candidate.declared_size,
        "Processing upload"
    );

    let stored = state.store.store(&candidate, &bucket).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            path: stored.path,
            url: stored.url,
        }),
    ))
}

/// Delete a stored file by its relative reference.
///
/// Idempotent: deleting a missing file reports `deleted: true`. The owning
/// business record is the caller's concern; this only releases the physical
/// file.
#[tracing::instrument(skip(state), fields(reference = %reference, operation = "delete_file"))]
pub async fn delete_file(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Json<DeleteResponse> {
    let deleted = state.store.delete(&reference).await;
    Json(DeleteResponse { deleted })
}
