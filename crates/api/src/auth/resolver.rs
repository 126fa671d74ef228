//! Session resolution from request headers.

use async_trait::async_trait;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use planvision_db::models::session::Session;
use planvision_db::models::user::User;
use planvision_db::repositories::{CrudRepository, SessionRepository};
use planvision_db::Repositories;
use serde::Serialize;

use crate::auth::token::hash_session_token;
use crate::error::AppResult;

/// An authenticated session and the user it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSession {
    pub session: Session,
    pub user: User,
}

/// Turns request headers into a session.
///
/// `Ok(None)` means the request carries no usable credentials. `Err` means the
/// lookup itself failed; the middleware logs it and treats the request as
/// unauthenticated.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> AppResult<Option<ResolvedSession>>;
}

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Looks bearer tokens up in the session repository by their SHA-256 hash.
pub struct TokenSessionResolver {
    repos: Repositories,
}

impl TokenSessionResolver {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl SessionResolver for TokenSessionResolver {
    async fn resolve(&self, headers: &HeaderMap) -> AppResult<Option<ResolvedSession>> {
        let Some(token) = bearer_token(headers) else {
            return Ok(None);
        };

        let token_hash = hash_session_token(token);
        let Some(session) = self
            .repos
            .sessions
            .find_active_by_token_hash(&token_hash)
            .await?
        else {
            tracing::debug!("Bearer token matched no active session");
            return Ok(None);
        };

        let user = self.repos.users.find_by_id(session.user_id).await?;
        match user {
            Some(user) => Ok(Some(ResolvedSession { session, user })),
            None => {
                tracing::warn!(user_id = %session.user_id, "Session refers to a missing user");
                Ok(None)
            }
        }
    }
}
