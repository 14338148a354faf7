//! Router construction

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{health, uploads};
use crate::state::AppState;

/// Extra room on top of the upload limit for multipart framing, so the body
/// limit rejects only bodies the validator would reject anyway.
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Build the application router with tracing, CORS, and body-limit layers.
pub fn build_router(state: AppState) -> Router {
    let body_limit = (state.config.max_file_size_bytes + MULTIPART_OVERHEAD_BYTES) as usize;
    let cors = build_cors(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/uploads/{bucket}", post(uploads::upload_image))
        .route("/api/files/{*reference}", delete(uploads::delete_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
