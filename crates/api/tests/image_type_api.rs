//! HTTP-level tests for the `/image-types` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_image_type, create_render_config, delete_auth, get,
    get_auth, patch_json_auth, post_json_auth, sign_up,
};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn missing_image_type_returns_404_with_message() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let response = get_auth(
        &app.router,
        &format!("/image-types/{}", Uuid::new_v4()),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "ImageType not found");
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn delete_twice_returns_204_then_404() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;
    let image_type = create_image_type(&app.router, &token, "floor_plan_2d").await;
    let uri = format!("/image-types/{}", image_type["id"].as_str().unwrap());

    let response = delete_auth(&app.router, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(&app.router, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "ImageType not found");
}

#[tokio::test]
async fn create_list_get_and_patch() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let created = create_image_type(&app.router, &token, "floor_plan_2d").await;
    assert_eq!(created["value"], "floor_plan_2d");
    assert!(created["description"].is_null());
    create_image_type(&app.router, &token, "room_photo").await;

    let response = get_auth(&app.router, "/image-types", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let ids: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);
    let mut sorted = ids.clone();
    sorted.sort_by_key(|id| Uuid::parse_str(id).unwrap());
    assert_eq!(ids, sorted, "list must be ordered by id ascending");

    let uri = format!("/image-types/{}", created["id"].as_str().unwrap());
    let response = patch_json_auth(
        &app.router,
        &uri,
        json!({ "description": "Top-down 2D plan" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let patched = body_json(response).await;
    assert_eq!(patched["description"], "Top-down 2D plan");
    assert_eq!(patched["label"], created["label"]);
}

#[tokio::test]
async fn patch_missing_image_type_returns_404() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let response = patch_json_auth(
        &app.router,
        &format!("/image-types/{}", Uuid::new_v4()),
        json!({ "label": "Anything" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_value_conflicts() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;
    create_image_type(&app.router, &token, "floor_plan_2d").await;

    let response = post_json_auth(
        &app.router,
        "/image-types",
        json!({ "label": "Again", "value": "floor_plan_2d" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_body_is_rejected_with_field_messages() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let response = post_json_auth(
        &app.router,
        "/image-types",
        json!({ "label": "", "value": "x".repeat(101) }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["label"].is_array());
    assert!(json["fields"]["value"].is_array());

    let response = post_json_auth(&app.router, "/image-types", json!({ "label": "x" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let response = get_auth(&app.router, "/image-types/not-a-uuid", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());

    let response = delete_auth(&app.router, "/image-types/123", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn routes_require_a_session() {
    let app = build_test_app();
    let response = get(&app.router, "/image-types").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn image_type_in_use_cannot_be_deleted() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;
    let config = create_render_config(&app.router, &token).await;
    let uri = format!("/image-types/{}", config["imageTypeId"].as_str().unwrap());

    let response = delete_auth(&app.router, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(
        json["error"],
        "ImageType is still referenced (render_configs_image_type_id_fkey)"
    );

    let response = get_auth(&app.router, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn patch_with_null_description_clears_it() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;
    let created = post_json_auth(
        &app.router,
        "/image-types",
        json!({ "label": "Floor plan", "value": "floor_plan_2d", "description": "Top-down" }),
        &token,
    )
    .await;
    let created = body_json(created).await;
    let uri = format!("/image-types/{}", created["id"].as_str().unwrap());

    let response = patch_json_auth(&app.router, &uri, json!({ "label": "Plan" }), &token).await;
    assert_eq!(body_json(response).await["description"], "Top-down");

    let response =
        patch_json_auth(&app.router, &uri, json!({ "description": null }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["description"].is_null());
    assert_eq!(json["label"], "Plan");
}
