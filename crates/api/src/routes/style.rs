use axum::routing::get;
use axum::Router;

use crate::handlers::style;
use crate::state::AppState;

/// Routes mounted at `/styles`.
///
/// ```text
/// GET    /        -> list (?imageTypeId= filters by applicability)
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(style::list).post(style::create))
        .route(
            "/{id}",
            get(style::get_by_id)
                .patch(style::update)
                .delete(style::delete),
        )
}
