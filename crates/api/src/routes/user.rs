use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /me      -> me
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(user::me))
        .route("/", get(user::list).post(user::create))
        .route(
            "/{id}",
            get(user::get_by_id).patch(user::update).delete(user::delete),
        )
}
