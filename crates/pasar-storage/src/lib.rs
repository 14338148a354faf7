//! Pasar Storage Library
//!
//! Disk-backed storage for the Pasar UMKM upload pipeline. Accepted files
//! land under `<root>/uploads/<bucket>/<sanitized-name>` via a rename-based
//! move, so a file is never visible under its final name before it is fully
//! written. Stored file references (`uploads/<bucket>/<name>`) are relative
//! to the public-servable root and must not contain `..` or a leading `/`.

pub mod disk;
pub mod error;
pub mod filenames;

// Re-export commonly used types
pub use disk::{DiskStore, StoredFile};
pub use error::{StorageError, StorageResult};
pub use filenames::{sanitize_filename, Clock, RandomTokens, SystemClock, TokenSource};
