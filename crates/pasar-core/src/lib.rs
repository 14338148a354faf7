//! Pasar Core Library
//!
//! This crate provides the shared domain pieces of the Pasar UMKM upload
//! boundary: error types, configuration, upload validation, and image URL
//! resolution. It is framework-agnostic; the HTTP surface lives in
//! `pasar-api` and the disk-backed store in `pasar-storage`.

pub mod config;
pub mod constants;
pub mod error;
pub mod image_url;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use validation::{validate_upload, UploadCandidate, UploadPolicy};
