//! HTTP-level tests for the `/input-images` resource, including multipart
//! upload and signed URLs.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_input_image, delete_auth, get_auth, post_json_auth,
    post_multipart_auth, sign_up, BUCKET,
};
use serde_json::json;

#[tokio::test]
async fn create_from_url_uses_session_user() {
    let app = build_test_app();
    let (token, user) = sign_up(&app.router, "ada@example.com").await;

    let image = create_input_image(&app.router, &token).await;
    assert_eq!(image["url"], "https://cdn.example.com/plan.png");
    assert_eq!(image["userId"], user["id"]);
    assert!(image["createdAt"].is_string());
}

#[tokio::test]
async fn create_rejects_non_url() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let response =
        post_json_auth(&app.router, "/input-images", json!({ "url": "plan.png" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_stores_object_and_records_public_url() {
    let app = build_test_app();
    let (token, user) = sign_up(&app.router, "ada@example.com").await;

    let response = post_multipart_auth(
        &app.router,
        "/input-images/upload",
        "file",
        "my plan.png",
        "image/png",
        b"\x89PNG fake bytes",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let image = body_json(response).await;
    assert_eq!(image["userId"], user["id"]);

    let url = image["url"].as_str().unwrap();
    let prefix = format!("https://storage.googleapis.com/{BUCKET}/input-images/");
    assert!(url.starts_with(&prefix), "unexpected url {url}");
    assert!(url.ends_with("-my_plan.png"));

    let object_name = app.state.storage.object_name_from_url(url).unwrap();
    let object = app.objects.get(&object_name).await.unwrap();
    assert_eq!(object.bytes, b"\x89PNG fake bytes");
    assert_eq!(object.content_type, "image/png");
}

#[tokio::test]
async fn upload_without_file_field_is_400() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let response = post_multipart_auth(
        &app.router,
        "/input-images/upload",
        "attachment",
        "plan.png",
        "image/png",
        b"bytes",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.objects.is_empty().await);
}

#[tokio::test]
async fn upload_over_size_limit_is_400() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    // The test storage config caps uploads at 1 KiB.
    let response = post_multipart_auth(
        &app.router,
        "/input-images/upload",
        "file",
        "big.png",
        "image/png",
        &[0u8; 2048],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.objects.is_empty().await);
}

#[tokio::test]
async fn signed_url_for_uploaded_image() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let response = post_multipart_auth(
        &app.router,
        "/input-images/upload",
        "file",
        "plan.png",
        "image/png",
        b"bytes",
        &token,
    )
    .await;
    let image = body_json(response).await;
    let id = image["id"].as_str().unwrap();

    let response = get_auth(
        &app.router,
        &format!("/input-images/{id}/signed-url?ttlSecs=60"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["url"]
        .as_str()
        .unwrap()
        .starts_with(&format!("memory://{BUCKET}/input-images/")));
    assert!(json["expiresAt"].is_string());
}

#[tokio::test]
async fn signed_url_ttl_out_of_range_is_400() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let response = post_multipart_auth(
        &app.router,
        "/input-images/upload",
        "file",
        "plan.png",
        "image/png",
        b"bytes",
        &token,
    )
    .await;
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = get_auth(
        &app.router,
        &format!("/input-images/{id}/signed-url?ttlSecs=0"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("TTL"));
}

#[tokio::test]
async fn signed_url_for_external_image_is_400() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;
    let image = create_input_image(&app.router, &token).await;

    let response = get_auth(
        &app.router,
        &format!("/input-images/{}/signed-url", image["id"].as_str().unwrap()),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_row_and_stored_object() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let response = post_multipart_auth(
        &app.router,
        "/input-images/upload",
        "file",
        "plan.png",
        "image/png",
        b"bytes",
        &token,
    )
    .await;
    let image = body_json(response).await;
    let uri = format!("/input-images/{}", image["id"].as_str().unwrap());
    assert_eq!(app.objects.len().await, 1);

    assert_eq!(
        delete_auth(&app.router, &uri, &token).await.status(),
        StatusCode::NO_CONTENT
    );
    assert!(app.objects.is_empty().await);

    let response = get_auth(&app.router, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "InputImage not found");
}

#[tokio::test]
async fn delete_of_external_image_leaves_storage_alone() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;
    let image = create_input_image(&app.router, &token).await;

    let response = delete_auth(
        &app.router,
        &format!("/input-images/{}", image["id"].as_str().unwrap()),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
