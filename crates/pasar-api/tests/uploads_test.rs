//! End-to-end tests for the upload HTTP surface, running the router against
//! a temporary storage root.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use pasar_api::{build_router, AppState};
use pasar_core::Config;
use pasar_storage::DiskStore;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "pasar-test-boundary";

async fn test_app(dir: &TempDir) -> axum::Router {
    let config = Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        storage_root: dir.path().to_path_buf(),
        public_base_url: "http://localhost:4000".to_string(),
        max_file_size_bytes: 5 * 1024 * 1024,
        allowed_extensions: vec!["jpg", "jpeg", "png", "webp"]
            .into_iter()
            .map(String::from)
            .collect(),
        allowed_content_types: vec!["image/jpeg", "image/jpg", "image/png", "image/webp"]
            .into_iter()
            .map(String::from)
            .collect(),
    };

    let store = DiskStore::new(
        dir.path(),
        config.public_base_url.clone(),
        config.upload_policy(),
    )
    .await
    .unwrap();

    build_router(AppState::new(config, store))
}

fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(bucket: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/uploads/{bucket}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn upload_stores_file_and_returns_reference() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let body = multipart_body("image", "foto produk.png", "image/png", b"png-bytes");
    let response = app.oneshot(upload_request("produk", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;

    let path = json["path"].as_str().unwrap();
    assert!(path.starts_with("uploads/produk/"));
    assert!(path.ends_with(".png"));
    assert_eq!(
        json["url"].as_str().unwrap(),
        format!("http://localhost:4000/{path}")
    );

    let on_disk = std::fs::read(dir.path().join(path)).unwrap();
    assert_eq!(on_disk, b"png-bytes");
}

#[tokio::test]
async fn upload_rejects_gif_with_localized_message() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let body = multipart_body("image", "anim.gif", "image/gif", b"gif-bytes");
    let response = app.oneshot(upload_request("produk", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["code"], "INVALID_INPUT");
    assert!(json["error"].as_str().unwrap().contains("JPG"));
}

#[tokio::test]
async fn upload_rejects_file_over_five_mib() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let oversized = vec![0u8; 5 * 1024 * 1024 + 1];
    let body = multipart_body("image", "big.png", "image/png", &oversized);
    let response = app.oneshot(upload_request("produk", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = json_body(response).await;
    assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
    assert!(json["error"].as_str().unwrap().contains("5MB"));
}

#[tokio::test]
async fn upload_requires_image_field() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let body = multipart_body("other", "a.png", "image/png", b"png");
    let response = app.oneshot(upload_request("produk", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "File gambar wajib diupload.");
}

#[tokio::test]
async fn upload_rejects_unsafe_bucket() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let body = multipart_body("image", "a.png", "image/png", b"png");
    let response = app.oneshot(upload_request("Produk", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_is_idempotent_over_http() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    // Upload, then delete twice; both deletes succeed.
    let body = multipart_body("image", "toko.jpg", "image/jpeg", b"jpg-bytes");
    let response = app
        .clone()
        .oneshot(upload_request("toko", body))
        .await
        .unwrap();
    let json = json_body(response).await;
    let path = json["path"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/files/{path}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["deleted"], true);
    }

    assert!(!dir.path().join(&path).exists());
}

#[tokio::test]
async fn delete_refuses_traversal_reference() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/files/uploads/produk/..%2F..%2Fetc%2Fpasswd")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["deleted"], false);
}

#[tokio::test]
async fn health_probe_responds() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
}
