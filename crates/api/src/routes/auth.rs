use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/api/auth`.
///
/// ```text
/// POST /sign-up/email    -> sign_up_email
/// POST /sign-in/email    -> sign_in_email
/// POST /sign-out         -> sign_out
/// GET  /get-session      -> get_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-up/email", post(auth::sign_up_email))
        .route("/sign-in/email", post(auth::sign_in_email))
        .route("/sign-out", post(auth::sign_out))
        .route("/get-session", get(auth::get_session))
}
