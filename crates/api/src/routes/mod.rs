pub mod auth;
pub mod generation;
pub mod health;
pub mod image_type;
pub mod input_image;
pub mod project;
pub mod render_config;
pub mod style;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree (everything except `/health`).
///
/// Route hierarchy:
///
/// ```text
/// /api/auth/sign-up/email                          sign up (public)
/// /api/auth/sign-in/email                          sign in (public)
/// /api/auth/sign-out                               sign out (public, token optional)
/// /api/auth/get-session                            current session (requires auth)
///
/// /users/me                                        current user
/// /users                                           list, create
/// /users/{id}                                      get, update, delete
///
/// /image-types                                     list, create
/// /image-types/{id}                                get, update, delete
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
///
/// /render-configs                                  list, create
/// /render-configs/{id}                             get, update, delete
/// /render-configs/{id}/generations                 list, queue
///
/// /generations/{id}                                poll, report status
///
/// /input-images                                    list, create from URL
/// /input-images/upload                             multipart upload
/// /input-images/{id}                               get, update, delete
/// /input-images/{id}/signed-url                    time-limited read URL
///
/// /styles                                          list (?imageTypeId=), create
/// /styles/{id}                                     get, update, delete
/// ```
///
/// Every route outside `/api/auth` requires a session.
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth::router())
        .nest("/users", user::router())
        .nest("/image-types", image_type::router())
        .nest("/projects", project::router())
        .nest("/render-configs", render_config::router())
        .nest("/generations", generation::router())
        .nest("/input-images", input_image::router(max_upload_bytes))
        .nest("/styles", style::router())
}
