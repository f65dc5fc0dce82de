//! Real socket tests.
//!
//! These start the router on an ephemeral port and talk to it with an HTTP
//! client, so the URL returned by an upload is fetched exactly as a browser
//! would fetch it.

use std::net::SocketAddr;

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use imghost::{create_router, ImageStore, RouterConfig};

use super::test_utils::{image_bytes, list_dir};

async fn spawn_server(upload_dir: std::path::PathBuf) -> SocketAddr {
    let store = ImageStore::open(upload_dir).await.unwrap();
    let router = create_router(store, RouterConfig::default().with_tracing(false));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

fn image_part(name: &str, mime: &str, data: Vec<u8>) -> Part {
    Part::bytes(data)
        .file_name(name.to_string())
        .mime_str(mime)
        .unwrap()
}

#[tokio::test]
async fn test_upload_fetch_delete_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().join("uploads");
    let addr = spawn_server(upload_dir.clone()).await;
    let client = reqwest::Client::new();
    let data = image_bytes(512_000);

    // Upload
    let form = Form::new().part("image", image_part("cat.png", "image/png", data.clone()));
    let response = client
        .post(format!("http://{}/upload", addr))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["data"]["size"], 512_000);
    assert_eq!(json["data"]["originalName"], "cat.png");

    let url = json["data"]["url"].as_str().unwrap().to_string();
    let filename = json["data"]["filename"].as_str().unwrap().to_string();
    assert_eq!(url, format!("http://{}/uploads/{}", addr, filename));

    // The returned URL serves the same bytes
    let fetched = client.get(&url).send().await.unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(fetched.bytes().await.unwrap().to_vec(), data);

    // Listed
    let json: serde_json::Value = client
        .get(format!("http://{}/images", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["data"][0]["filename"], filename.as_str());
    assert_eq!(json["data"][0]["size"], 512_000);

    // Deleted
    let response = client
        .delete(format!("http://{}/images/{}", addr, filename))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(list_dir(&upload_dir).is_empty());

    let fetched = client.get(&url).send().await.unwrap();
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_multi_upload_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().join("uploads");
    let addr = spawn_server(upload_dir.clone()).await;
    let client = reqwest::Client::new();

    let form = Form::new()
        .part("images", image_part("a.png", "image/png", image_bytes(100)))
        .part("images", image_part("b.jpg", "image/jpeg", image_bytes(200)))
        .part("images", image_part("c.bmp", "image/bmp", image_bytes(300)));

    let response = client
        .post(format!("http://{}/upload-multiple", addr))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = response.json().await.unwrap();
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["originalName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a.png", "b.jpg", "c.bmp"]);
    assert_eq!(list_dir(&upload_dir).len(), 3);
}

#[tokio::test]
async fn test_rejected_upload_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().join("uploads");
    let addr = spawn_server(upload_dir.clone()).await;

    let form = Form::new().part(
        "image",
        image_part("doc.pdf", "application/pdf", b"%PDF-1.4".to_vec()),
    );
    let response = reqwest::Client::new()
        .post(format!("http://{}/upload", addr))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["message"], "Only image files may be uploaded");
    assert!(list_dir(&upload_dir).is_empty());
}
