//! HTTP-level tests for sign-up, sign-in, sign-out, session lookup and the
//! session guard.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, build_test_app, get, get_auth, post_json, post_json_auth, sign_up};
use planvision_api::auth::token::generate_session_token;
use planvision_db::models::session::CreateSession;
use planvision_db::repositories::SessionRepository;
use serde_json::json;

#[tokio::test]
async fn sign_up_returns_token_and_user() {
    let app = build_test_app();
    let (token, user) = sign_up(&app.router, "ada@example.com").await;

    assert_eq!(token.len(), 64);
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["name"], "Test User");
    assert!(user.get("passwordHash").is_none());
}

#[tokio::test]
async fn sign_up_twice_with_same_email_conflicts() {
    let app = build_test_app();
    sign_up(&app.router, "ada@example.com").await;

    let response = post_json(
        &app.router,
        "/api/auth/sign-up/email",
        json!({ "email": "ADA@example.com", "password": "another-pass", "name": "Ada" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn sign_up_rejects_short_password_and_bad_email() {
    let app = build_test_app();

    let response = post_json(
        &app.router,
        "/api/auth/sign-up/email",
        json!({ "email": "ada@example.com", "password": "short", "name": "Ada" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        &app.router,
        "/api/auth/sign-up/email",
        json!({ "email": "not-an-email", "password": "long-enough", "name": "Ada" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["email"].is_array());
}

#[tokio::test]
async fn sign_in_with_correct_password_issues_new_token() {
    let app = build_test_app();
    let (first, _) = sign_up(&app.router, "ada@example.com").await;

    let response = post_json(
        &app.router,
        "/api/auth/sign-in/email",
        json!({ "email": "ada@example.com", "password": "floor-plan-42" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let second = json["token"].as_str().unwrap();
    assert_ne!(second, first);
    assert_eq!(json["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn sign_in_with_wrong_password_or_unknown_email_is_401() {
    let app = build_test_app();
    sign_up(&app.router, "ada@example.com").await;

    let response = post_json(
        &app.router,
        "/api/auth/sign-in/email",
        json!({ "email": "ada@example.com", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        &app.router,
        "/api/auth/sign-in/email",
        json!({ "email": "ghost@example.com", "password": "floor-plan-42" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn get_session_returns_session_and_user() {
    let app = build_test_app();
    let (token, user) = sign_up(&app.router, "ada@example.com").await;

    let response = get_auth(&app.router, "/api/auth/get-session", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user["id"]);
    assert_eq!(json["session"]["userId"], user["id"]);
    assert!(json["session"].get("tokenHash").is_none());
}

#[tokio::test]
async fn users_me_requires_a_session() {
    let app = build_test_app();
    let (token, user) = sign_up(&app.router, "ada@example.com").await;

    let response = get(&app.router, "/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let response = get_auth(&app.router, "/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], user["id"]);
}

#[tokio::test]
async fn unknown_token_is_treated_as_no_session() {
    let app = build_test_app();
    let response = get_auth(&app.router, "/image-types", "not-a-real-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_session_is_rejected() {
    let app = build_test_app();
    let (_, user) = sign_up(&app.router, "ada@example.com").await;

    let (token, token_hash) = generate_session_token();
    app.state
        .repos
        .sessions
        .create(&CreateSession {
            user_id: user["id"].as_str().unwrap().parse().unwrap(),
            token_hash,
            expires_at: Utc::now() - Duration::minutes(1),
        })
        .await
        .unwrap();

    let response = get_auth(&app.router, "/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_out_revokes_the_presented_token() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let response = post_json_auth(&app.router, "/api/auth/sign-out", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(&app.router, "/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Signing out again is harmless.
    let response = post_json_auth(&app.router, "/api/auth/sign-out", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
