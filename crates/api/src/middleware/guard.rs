use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use planvision_core::error::CoreError;

use crate::auth::resolver::ResolvedSession;
use crate::error::AppError;

/// The session attached by [`attach_session`](super::session::attach_session).
///
/// Use as a handler argument on every protected route:
///
/// ```ignore
/// async fn me(RequireSession(session): RequireSession) -> Json<User> {
///     Json(session.user)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireSession(pub ResolvedSession);

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ResolvedSession>()
            .cloned()
            .map(RequireSession)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Authentication required".into()))
            })
    }
}
