use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Attach the resolved session (if any) to the request.
///
/// Resolution failures are logged and the request continues unauthenticated;
/// guarded handlers reject it downstream.
pub async fn attach_session(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match state.sessions.resolve(req.headers()).await {
        Ok(Some(resolved)) => {
            tracing::debug!(user_id = %resolved.user.id, "Session attached");
            req.extensions_mut().insert(resolved);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(error = %e, "Session resolution failed, continuing unauthenticated");
        }
    }
    next.run(req).await
}
