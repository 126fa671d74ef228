//! HTTP-level tests for the `/styles` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_image_type, create_render_config, create_style,
    delete_auth, get_auth, patch_json_auth, post_json_auth, sign_up,
};
use serde_json::{json, Value};
use uuid::Uuid;

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn filter_by_image_type_includes_universal_styles() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;
    let plan = create_image_type(&app.router, &token, "floor_plan_2d").await;
    let photo = create_image_type(&app.router, &token, "room_photo").await;

    let universal = create_style(&app.router, &token, vec![]).await;
    let plan_only = create_style(&app.router, &token, vec![plan["id"].clone()]).await;
    let photo_only = create_style(&app.router, &token, vec![photo["id"].clone()]).await;

    let response = get_auth(
        &app.router,
        &format!("/styles?imageTypeId={}", plan["id"].as_str().unwrap()),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let filtered = ids(&body_json(response).await);
    assert!(filtered.contains(&universal["id"].as_str().unwrap().to_string()));
    assert!(filtered.contains(&plan_only["id"].as_str().unwrap().to_string()));
    assert!(!filtered.contains(&photo_only["id"].as_str().unwrap().to_string()));

    let response = get_auth(&app.router, "/styles", &token).await;
    assert_eq!(ids(&body_json(response).await).len(), 3);
}

#[tokio::test]
async fn unknown_image_type_filter_returns_only_universal_styles() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;
    let plan = create_image_type(&app.router, &token, "floor_plan_2d").await;
    let universal = create_style(&app.router, &token, vec![]).await;
    create_style(&app.router, &token, vec![plan["id"].clone()]).await;

    let response = get_auth(
        &app.router,
        &format!("/styles?imageTypeId={}", Uuid::new_v4()),
        &token,
    )
    .await;
    let filtered = ids(&body_json(response).await);
    assert_eq!(filtered, vec![universal["id"].as_str().unwrap().to_string()]);
}

#[tokio::test]
async fn thumbnail_must_be_a_url() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;

    let response = post_json_auth(
        &app.router,
        "/styles",
        json!({
            "name": "Industrial",
            "thumbnailUrl": "not a url",
            "promptFragment": "exposed brick",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["fields"]["thumbnailUrl"].is_array());
}

#[tokio::test]
async fn patch_replaces_image_type_list() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;
    let plan = create_image_type(&app.router, &token, "floor_plan_2d").await;
    let style = create_style(&app.router, &token, vec![plan["id"].clone()]).await;

    let response = patch_json_auth(
        &app.router,
        &format!("/styles/{}", style["id"].as_str().unwrap()),
        json!({ "imageTypeIds": [] }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let patched = body_json(response).await;
    assert_eq!(patched["imageTypeIds"], json!([]));
    assert_eq!(patched["name"], "Scandinavian");
}

#[tokio::test]
async fn delete_nulls_style_on_render_configs() {
    let app = build_test_app();
    let (token, _) = sign_up(&app.router, "ada@example.com").await;
    let config = create_render_config(&app.router, &token).await;
    let style = create_style(&app.router, &token, vec![config["imageTypeId"].clone()]).await;
    let config_uri = format!("/render-configs/{}", config["id"].as_str().unwrap());

    let response = patch_json_auth(
        &app.router,
        &config_uri,
        json!({ "styleId": style["id"] }),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["styleId"], style["id"]);

    let response = delete_auth(
        &app.router,
        &format!("/styles/{}", style["id"].as_str().unwrap()),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(&app.router, &config_uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["styleId"].is_null());
}
