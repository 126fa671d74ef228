use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::input_image;
use crate::state::AppState;

/// Headroom over the file size for multipart boundaries and headers.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/input-images`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create (JSON, already-hosted URL)
/// POST   /upload            -> upload (multipart `file`)
/// GET    /{id}              -> get_by_id
/// PATCH  /{id}              -> update
/// DELETE /{id}              -> delete
/// GET    /{id}/signed-url   -> signed_url
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(input_image::list).post(input_image::create))
        .route(
            "/upload",
            post(input_image::upload).layer(DefaultBodyLimit::max(
                max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
            )),
        )
        .route(
            "/{id}",
            get(input_image::get_by_id)
                .patch(input_image::update)
                .delete(input_image::delete),
        )
        .route("/{id}/signed-url", get(input_image::signed_url))
}
