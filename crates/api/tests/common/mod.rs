#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use planvision_api::auth::resolver::TokenSessionResolver;
use planvision_api::config::ServerConfig;
use planvision_api::router::build_app_router;
use planvision_api::state::AppState;
use planvision_db::Repositories;
use planvision_storage::memory::MemoryObjectStore;
use planvision_storage::{StorageBackend, StorageConfig, StorageService};

pub const BUCKET: &str = "planvision-test";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8081".to_string()],
        request_timeout_secs: 30,
        session_ttl_days: 7,
    }
}

pub fn test_storage_config() -> StorageConfig {
    StorageConfig {
        bucket: BUCKET.to_string(),
        project_id: "planvision-test-project".to_string(),
        public_domain: None,
        max_upload_bytes: 1024,
        backend: StorageBackend::Memory,
    }
}

/// A router over in-memory repositories and object store.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub objects: Arc<MemoryObjectStore>,
}

/// Build the full application router with all middleware layers, backed by
/// the in-memory repositories and object store.
pub fn build_test_app() -> TestApp {
    let repos = Repositories::in_memory();
    let objects = Arc::new(MemoryObjectStore::new(BUCKET));
    let storage = StorageService::with_store(objects.clone(), &test_storage_config());

    let state = AppState {
        config: Arc::new(test_config()),
        sessions: Arc::new(TokenSessionResolver::new(repos.clone())),
        repos,
        storage: Arc::new(storage),
    };

    TestApp {
        router: build_app_router(state.clone()),
        state,
        objects,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    send_json(app, Method::POST, uri, body, None).await
}

pub async fn post_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response {
    send_json(app, Method::POST, uri, body, Some(token)).await
}

pub async fn patch_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response {
    send_json(app, Method::PATCH, uri, body, Some(token)).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Value,
    token: Option<&str>,
) -> Response {
    send(
        app,
        request(method, uri, token)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// POST a single multipart field named `field`.
pub async fn post_multipart_auth(
    app: &Router,
    uri: &str,
    field: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
    token: &str,
) -> Response {
    let boundary = "planvision-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    send(
        app,
        request(Method::POST, uri, Some(token))
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Sign up a fresh user and return `(token, user_json)`.
pub async fn sign_up(app: &Router, email: &str) -> (String, Value) {
    let response = post_json(
        app,
        "/api/auth/sign-up/email",
        json!({ "email": email, "password": "floor-plan-42", "name": "Test User" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let token = json["token"].as_str().unwrap().to_string();
    (token, json["user"].clone())
}

/// Create a resource and return its JSON, asserting 201.
pub async fn create_ok(app: &Router, uri: &str, body: Value, token: &str) -> Value {
    let response = post_json_auth(app, uri, body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
    body_json(response).await
}

pub async fn create_image_type(app: &Router, token: &str, value: &str) -> Value {
    create_ok(
        app,
        "/image-types",
        json!({ "label": "Floor plan 2D", "value": value }),
        token,
    )
    .await
}

pub async fn create_project(app: &Router, token: &str) -> Value {
    create_ok(app, "/projects", json!({ "name": "Loft" }), token).await
}

pub async fn create_input_image(app: &Router, token: &str) -> Value {
    create_ok(
        app,
        "/input-images",
        json!({ "url": "https://cdn.example.com/plan.png" }),
        token,
    )
    .await
}

pub async fn create_style(app: &Router, token: &str, image_type_ids: Vec<Value>) -> Value {
    create_ok(
        app,
        "/styles",
        json!({
            "name": "Scandinavian",
            "thumbnailUrl": "https://cdn.example.com/scandi.png",
            "promptFragment": "light oak, white walls",
            "imageTypeIds": image_type_ids,
        }),
        token,
    )
    .await
}

/// A render config with all required references created fresh.
pub async fn create_render_config(app: &Router, token: &str) -> Value {
    let project = create_project(app, token).await;
    let image = create_input_image(app, token).await;
    let image_type = create_image_type(app, token, &format!("type_{}", uuid::Uuid::new_v4())).await;
    create_ok(
        app,
        "/render-configs",
        json!({
            "projectId": project["id"],
            "inputImageId": image["id"],
            "imageTypeId": image_type["id"],
            "colors": ["#A1B2C3", "fff"],
            "perspective": "eye-level",
        }),
        token,
    )
    .await
}
