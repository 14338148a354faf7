//! Disk-backed store for accepted uploads.

use std::path::PathBuf;
use std::sync::Arc;

use pasar_core::constants::UPLOADS_PREFIX;
use pasar_core::validation::{validate_upload, UploadCandidate, UploadPolicy};
use tokio::fs;

use crate::error::{StorageError, StorageResult};
use crate::filenames::{sanitize_filename, Clock, RandomTokens, SystemClock, TokenSource};

/// A stored file: the relative reference persisted by the caller plus the
/// public URL consumers can fetch it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Relative reference of the form `uploads/<bucket>/<sanitized-name>`.
    pub path: String,
    /// `<public_base_url>/<path>`.
    pub url: String,
}

/// Local filesystem storage for uploads.
///
/// Writes are move-based: the payload lands in a hidden temp file inside the
/// bucket directory and is renamed into place, so no partially-written file
/// is ever visible under its final name. The store exclusively owns the
/// physical files; callers hold only the relative reference.
#[derive(Clone)]
pub struct DiskStore {
    root: PathBuf,
    public_base_url: String,
    policy: UploadPolicy,
    clock: Arc<dyn Clock>,
    tokens: Arc<dyn TokenSource>,
}

impl DiskStore {
    /// Create a new DiskStore rooted at `root`.
    ///
    /// # Arguments
    /// * `root` - Public-servable root directory (e.g. "public")
    /// * `public_base_url` - Base URL for serving files (e.g. "http://localhost:4000")
    /// * `policy` - Upload limits enforced before any file is written
    pub async fn new(
        root: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
        policy: UploadPolicy,
    ) -> StorageResult<Self> {
        Self::with_capabilities(root, public_base_url, policy, SystemClock, RandomTokens).await
    }

    /// Like [`DiskStore::new`] but with injected clock and token source, for
    /// deterministic tests.
    pub async fn with_capabilities(
        root: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
        policy: UploadPolicy,
        clock: impl Clock + 'static,
        tokens: impl TokenSource + 'static,
    ) -> StorageResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage root {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(DiskStore {
            root,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            policy,
            clock: Arc::new(clock),
            tokens: Arc::new(tokens),
        })
    }

    /// Validate the candidate and persist it under `bucket`.
    ///
    /// Validation failures are propagated verbatim as
    /// [`StorageError::Rejected`]; I/O failures are wrapped with the
    /// underlying detail for diagnostics.
    pub async fn store(
        &self,
        candidate: &UploadCandidate,
        bucket: &str,
    ) -> StorageResult<StoredFile> {
        validate_upload(candidate, &self.policy)?;

        validate_bucket(bucket)?;

        let sanitized = sanitize_filename(
            &candidate.original_filename,
            self.clock.as_ref(),
            self.tokens.as_ref(),
        );

        let bucket_dir = self.root.join(UPLOADS_PREFIX).join(bucket);
        fs::create_dir_all(&bucket_dir)
            .await
            .map_err(|e| StorageError::StoreFailed(e.to_string()))?;

        let start = std::time::Instant::now();
        let final_path = bucket_dir.join(&sanitized);
        let temp_path = bucket_dir.join(format!(".{}.part", sanitized));

        if let Err(e) = fs::write(&temp_path, &candidate.data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::StoreFailed(e.to_string()));
        }

        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::StoreFailed(e.to_string()));
        }

        let path = format!("{}/{}/{}", UPLOADS_PREFIX, bucket, sanitized);
        let url = format!("{}/{}", self.public_base_url, path);

        tracing::info!(
            path = %final_path.display(),
            reference = %path,
            size_bytes = candidate.data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Stored upload"
        );

        Ok(StoredFile { path, url })
    }

    /// Delete a stored file by its relative reference.
    ///
    /// Idempotent: a missing file counts as already deleted and returns
    /// `true`. Failures are logged and converted to `false`; this method
    /// never propagates an error to the caller.
    pub async fn delete(&self, reference: &str) -> bool {
        let path = match self.resolve(reference) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(reference = %reference, error = %e, "Refused to delete invalid reference");
                return false;
            }
        };

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return true;
        }

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), reference = %reference, "Deleted stored file");
                true
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to delete stored file");
                false
            }
        }
    }

    /// Check whether a stored reference currently resolves to a file.
    pub async fn exists(&self, reference: &str) -> StorageResult<bool> {
        let path = self.resolve(reference)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    /// Public URL for a stored reference.
    pub fn url_for(&self, reference: &str) -> String {
        format!("{}/{}", self.public_base_url, reference.trim_start_matches('/'))
    }

    /// Resolve a stored reference to a filesystem path, rejecting traversal
    /// sequences and absolute paths.
    fn resolve(&self, reference: &str) -> StorageResult<PathBuf> {
        if reference.contains("..") || reference.starts_with('/') || reference.contains('\\') {
            return Err(StorageError::InvalidPath(
                "Reference contains invalid characters".to_string(),
            ));
        }
        Ok(self.root.join(reference))
    }
}

/// Buckets are caller-chosen logical directories; keep them to a single safe
/// path segment.
fn validate_bucket(bucket: &str) -> StorageResult<()> {
    let valid = !bucket.is_empty()
        && bucket.len() <= 32
        && bucket
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidPath(format!(
            "Invalid bucket name: {}",
            bucket
        )))
    }
}
