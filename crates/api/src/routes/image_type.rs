use axum::routing::get;
use axum::Router;

use crate::handlers::image_type;
use crate::state::AppState;

/// Routes mounted at `/image-types`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(image_type::list).post(image_type::create))
        .route(
            "/{id}",
            get(image_type::get_by_id)
                .patch(image_type::update)
                .delete(image_type::delete),
        )
}
