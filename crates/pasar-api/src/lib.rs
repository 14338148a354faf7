//! Pasar API
//!
//! HTTP surface for the Pasar UMKM upload boundary: a multipart upload
//! endpoint, idempotent delete-by-reference, and a health probe. Handlers
//! delegate to `pasar-core` for validation and `pasar-storage` for
//! persistence; this crate only adapts HTTP to those contracts.

pub mod error;
pub mod handlers;
pub mod multipart;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use routes::build_router;
pub use state::AppState;
