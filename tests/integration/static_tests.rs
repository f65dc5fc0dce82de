//! Static serving, health and discovery integration tests.
//!
//! Tests verify:
//! - Uploaded files are served byte-for-byte under `/uploads/`
//! - Content type is inferred from the extension
//! - The public directory fallback and the JSON 404
//! - Health, discovery and the bundled upload page

use axum::http::StatusCode;

use imghost::RouterConfig;

use super::test_utils::{body_bytes, body_json, get, image_bytes, MultipartBody, TestApp, TEST_HOST};

// =============================================================================
// Stored Files
// =============================================================================

#[tokio::test]
async fn test_uploaded_url_serves_identical_bytes() {
    let app = TestApp::new().await;
    let data = image_bytes(4096);

    let request = MultipartBody::new()
        .file("image", "cat.png", "image/png", &data)
        .into_request("/upload");
    let json = body_json(app.send(request).await).await;

    let url = json["data"]["url"].as_str().unwrap();
    let path = url
        .strip_prefix(&format!("http://{}", TEST_HOST))
        .expect("url is rooted at the request host");

    let response = app.send(get(path)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("content-type").unwrap(), "image/png");
    assert_eq!(body_bytes(response).await, data);
}

#[tokio::test]
async fn test_serves_content_type_by_extension() {
    let app = TestApp::new().await;
    app.place_file("photo.jpg", b"jpeg");
    app.place_file("anim.gif", b"gif");

    let response = app.send(get("/uploads/photo.jpg")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("content-type").unwrap(), "image/jpeg");

    let response = app.send(get("/uploads/anim.gif")).await;
    assert_eq!(response.headers().get("content-type").unwrap(), "image/gif");
}

#[tokio::test]
async fn test_missing_upload_is_not_found() {
    let app = TestApp::new().await;

    let response = app.send(get("/uploads/nope.png")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_uploads_cannot_escape_directory() {
    let app = TestApp::new().await;
    let outside = app.upload_dir.parent().unwrap().join("secret.png");
    std::fs::write(&outside, b"secret").unwrap();

    let response = app.send(get("/uploads/..%2Fsecret.png")).await;
    assert_ne!(response.status(), StatusCode::OK);
}

// =============================================================================
// Fallbacks
// =============================================================================

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;

    let response = app.send(get("/does-not-exist")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Not found");
}

#[tokio::test]
async fn test_public_directory_fallback() {
    let public = tempfile::tempdir().unwrap();
    std::fs::write(public.path().join("app.js"), b"console.log('hi');").unwrap();

    let config = RouterConfig::default()
        .with_tracing(false)
        .with_public_dir(public.path());
    let app = TestApp::with_config(config).await;

    let response = app.send(get("/app.js")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"console.log('hi');");

    // Missing assets still answer with the JSON envelope
    let response = app.send(get("/missing.css")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);

    // Routes take precedence over the public directory
    let response = app.send(get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_public_directory_is_ignored() {
    let config = RouterConfig::default()
        .with_tracing(false)
        .with_public_dir("/definitely/not/a/real/dir");
    let app = TestApp::with_config(config).await;

    let response = app.send(get("/index.html")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Not found");
}

// =============================================================================
// Health, Discovery, UI
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.send(get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["message"].is_string());
    assert!(chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_discovery() {
    let app = TestApp::new().await;

    let response = app.send(get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["baseUrl"], format!("http://{}", TEST_HOST));

    let endpoints = json["endpoints"].as_object().unwrap();
    for key in [
        "POST /upload",
        "POST /upload-multiple",
        "GET /images",
        "DELETE /images/{filename}",
        "GET /health",
    ] {
        assert!(endpoints.contains_key(key), "missing {}", key);
    }
}

#[tokio::test]
async fn test_discovery_behind_proxy() {
    let app = TestApp::new().await;

    let request = axum::http::Request::builder()
        .uri("/")
        .header("host", "img.example.com")
        .header("x-forwarded-proto", "https")
        .body(axum::body::Body::empty())
        .unwrap();
    let json = body_json(app.send(request).await).await;

    assert_eq!(json["baseUrl"], "https://img.example.com");
}

#[tokio::test]
async fn test_upload_page() {
    let app = TestApp::new().await;

    let response = app.send(get("/ui")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains(&format!("const BASE_URL = \"http://{}\";", TEST_HOST)));
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let app = TestApp::new().await;

    let request = axum::http::Request::builder()
        .uri("/images")
        .header("host", TEST_HOST)
        .header("origin", "https://somewhere.example")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}
