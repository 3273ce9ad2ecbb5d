//! End-to-end tests of the HTTP routes against a real store.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;
use tinylink_gateway::{App, AppState};
use tinylink_generator::HashGenerator;
use tinylink_shortener::ShortenerService;
use tinylink_storage::{persist, Store, StoreOptions};
use tower::ServiceExt;

fn router_with(store: Store) -> Router {
    let service = ShortenerService::new(store, HashGenerator::new());
    App::router(AppState::new(service))
}

fn in_memory_router() -> Router {
    router_with(Store::in_memory())
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

/// POSTs an url-encoded form body to `/`.
async fn shorten(router: &Router, form: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_owned()))
        .unwrap();

    let (status, _, body) = send(router, request).await;
    (status, body)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

#[tokio::test]
async fn shorten_returns_code_as_text() {
    let router = in_memory_router();

    let (status, body) = shorten(&router, "link=http%3A%2F%2Fexample.com").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1d22d4");
}

#[tokio::test]
async fn redirect_to_stored_url() {
    let router = in_memory_router();
    shorten(&router, "link=http%3A%2F%2Fexample.com").await;

    let (status, headers, _) = get(&router, "/1d22d4").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "http://example.com");
}

#[tokio::test]
async fn full_url_as_text() {
    let router = in_memory_router();
    shorten(&router, "link=https%3A%2F%2Fexample.com").await;

    let (status, _, body) = get(&router, "/getFullURL/19aac3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "https://example.com");
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let router = in_memory_router();

    let (status, headers, _) = get(&router, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(headers.get(header::LOCATION).is_none());

    let (status, _, _) = get(&router, "/getFullURL/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_link_is_rejected() {
    let router = in_memory_router();

    let (status, body) = shorten(&router, "link=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "link must not be empty");

    let (status, _) = shorten(&router, "other=field").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn collision_keeps_latest_url() {
    let router = in_memory_router();

    let (_, first) = shorten(&router, "link=http%3A%2F%2Fx.io%2Fag").await;
    let (_, second) = shorten(&router, "link=http%3A%2F%2Fx.io%2Fba").await;
    assert_eq!(first, "772d10");
    assert_eq!(first, second);

    let (_, _, body) = get(&router, "/getFullURL/772d10").await;
    assert_eq!(body, "http://x.io/ba");
}

#[tokio::test]
async fn url_that_is_not_a_header_value() {
    let router = in_memory_router();

    let (status, code) = shorten(&router, "link=http%3A%2F%2Fa%0Ab").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = get(&router, &format!("/getFullURL/{code}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "http://a\nb");

    let (status, headers, _) = get(&router, &format!("/{code}")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(headers.get(header::LOCATION).is_none());
}

#[tokio::test]
async fn health() {
    let router = in_memory_router();

    let (status, _, body) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

fn open_store(path: &Path) -> Store {
    Store::open(StoreOptions::builder().path(path).build()).unwrap()
}

#[tokio::test]
async fn links_survive_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("links.jsonl");

    let router = router_with(open_store(&path));
    let (status, code) = shorten(&router, "link=http%3A%2F%2Flocalhost%3A8080%2F").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(code, "6885f8");
    drop(router);

    let on_disk = persist::load(&path).unwrap();
    assert_eq!(on_disk.lookup("6885f8"), Some("http://localhost:8080/"));

    let router = router_with(open_store(&path));
    let (status, headers, _) = get(&router, "/6885f8").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "http://localhost:8080/");
}

#[tokio::test]
async fn storage_failure_is_internal_error() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");
    let router = router_with(open_store(&data_dir.join("links.jsonl")));
    std::fs::remove_dir_all(&data_dir).unwrap();

    let (status, body) = shorten(&router, "link=http%3A%2F%2Fexample.com").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "internal storage error");
}
