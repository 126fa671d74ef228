//! HTTP-level tests for the `/users` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get_auth, patch_json_auth, post_json_auth, sign_up};
use serde_json::json;

#[tokio::test]
async fn create_and_patch_store_lowercased_email() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let response = post_json_auth(
        &app.router,
        "/users",
        json!({ "email": "Grace@Example.COM", "name": "Grace" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let user = body_json(response).await;
    assert_eq!(user["email"], "grace@example.com");

    let response = patch_json_auth(
        &app.router,
        &format!("/users/{}", user["id"].as_str().unwrap()),
        json!({ "email": "G.Hopper@Example.com" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], "g.hopper@example.com");
}

#[tokio::test]
async fn email_differing_only_in_case_conflicts() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let response = post_json_auth(
        &app.router,
        "/users",
        json!({ "email": "ADA@example.com", "name": "Ada again" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[tokio::test]
async fn malformed_id_is_a_json_400() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let response = get_auth(&app.router, "/users/not-a-uuid", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
}
