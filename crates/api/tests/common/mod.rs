#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use iconlib_core::types::{Category, IconLibrary};
use iconlib_db::{CredentialStore, IconStore, MemoryStore};
use tower::ServiceExt;

use iconlib_api::auth::jwt::{issue_token, JwtConfig};
use iconlib_api::config::{ServerConfig, StoreBackend, UploadLimits};
use iconlib_api::router::build_app_router;
use iconlib_api::services::IconLibraryService;
use iconlib_api::state::AppState;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";
pub const BOUNDARY: &str = "iconlib-test-boundary";

pub fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        expiry_hours: 24,
    }
}

/// Build a test `ServerConfig` backed by the in-memory store, writing icons
/// into `icons_dir`.
pub fn test_config(icons_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 3000,
        cors_origins: vec![
            "http://localhost:5173".to_string(),
            "https://*.expo.dev".to_string(),
        ],
        request_timeout_secs: 30,
        jwt: test_jwt(),
        store: StoreBackend::Memory,
        library: "test".to_string(),
        bootstrap_library: false,
        seed_credential: None,
        icons_dir: icons_dir.to_path_buf(),
        public_scheme: "http".to_string(),
        upload: UploadLimits::default(),
        public_showcase: false,
    }
}

/// Store holding an icons document with a live `business` category (two
/// icons) and a deleted `archive` category, plus the test credential.
pub async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::with_library(IconLibrary::default());
    store
        .put_category(
            "business",
            &Category {
                deleted: false,
                data: vec![
                    "http://localhost:3000/icons/a.png".to_string(),
                    "http://localhost:3000/icons/b.png".to_string(),
                ],
            },
        )
        .await
        .unwrap();
    store
        .put_category(
            "archive",
            &Category {
                deleted: true,
                data: vec!["http://localhost:3000/icons/old.png".to_string()],
            },
        )
        .await
        .unwrap();
    store.upsert_credential(USERNAME, PASSWORD).await.unwrap();
    store
}

/// Build the full application router over `store`, with the same middleware
/// stack the binary uses.
pub fn build_test_app(store: MemoryStore, config: ServerConfig) -> Router {
    let store = Arc::new(store);
    let icons: Arc<dyn IconStore> = store.clone();
    let config = Arc::new(config);

    let state = AppState {
        library: IconLibraryService::new(icons, config.icons_dir.clone()),
        credentials: store,
        config,
    };
    build_app_router(state)
}

/// A valid bearer header value for the test secret.
pub fn bearer() -> String {
    let token = issue_token(USERNAME, &test_jwt()).unwrap();
    format!("Bearer {token}")
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, bearer())
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

fn json_request(method: Method, uri: &str, body: &serde_json::Value, auth: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if auth {
        builder = builder.header(AUTHORIZATION, bearer());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, &body, false)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, &body, true)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::PATCH, uri, &body, true)).await
}

/// One part of a multipart body: `(field, file name, content type, bytes)`.
pub type FilePart<'a> = (&'a str, &'a str, &'a str, &'a [u8]);

/// Encode `parts` as a `multipart/form-data` body using [`BOUNDARY`].
pub fn multipart_body(parts: &[FilePart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, file_name, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn upload(app: Router, category: &str, parts: &[FilePart<'_>]) -> Response {
    upload_raw(app, category, multipart_body(parts)).await
}

/// Send an already encoded multipart body to the upload route.
pub async fn upload_raw(app: Router, category: &str, body: Vec<u8>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/icon-category/{category}/upload"))
        .header(AUTHORIZATION, bearer())
        .header("host", "icons.test:3000")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
