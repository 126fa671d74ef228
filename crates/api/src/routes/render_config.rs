use axum::routing::get;
use axum::Router;

use crate::handlers::{generation, render_config};
use crate::state::AppState;

/// Routes mounted at `/render-configs`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// PATCH  /{id}                -> update
/// DELETE /{id}                -> delete
/// GET    /{id}/generations    -> generation::list_by_render_config
/// POST   /{id}/generations    -> generation::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(render_config::list).post(render_config::create))
        .route(
            "/{id}",
            get(render_config::get_by_id)
                .patch(render_config::update)
                .delete(render_config::delete),
        )
        .route(
            "/{id}/generations",
            get(generation::list_by_render_config).post(generation::create),
        )
}
