//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use planvision_core::error::CoreError;
use planvision_core::types::DbId;
use planvision_db::models::user::{CreateUser, UpdateUser, User};
use planvision_db::repositories::{CrudRepository, SessionRepository};

use super::{normalize_email, not_found_as};
use crate::error::{AppError, AppResult};
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::guard::RequireSession;
use crate::state::AppState;

const ENTITY: &str = "User";

fn user_not_found() -> AppError {
    AppError::Core(CoreError::not_found(ENTITY))
}

/// GET /users/me
pub async fn me(RequireSession(session): RequireSession) -> Json<User> {
    Json(session.user)
}

/// POST /users
///
/// Creates a user without credentials; they cannot sign in until a password
/// is set through sign-up.
pub async fn create(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedJson(mut input): ValidatedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    input.email = normalize_email(&input.email);
    let user = state.repos.users.create(&input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users
pub async fn list(
    State(state): State<AppState>,
    _session: RequireSession,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.repos.users.list().await?))
}

/// GET /users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<Json<User>> {
    let user = state
        .repos
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(user_not_found)?;
    Ok(Json(user))
}

/// PATCH /users/{id}
pub async fn update(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
    ValidatedJson(mut input): ValidatedJson<UpdateUser>,
) -> AppResult<Json<User>> {
    input.email = input.email.as_deref().map(normalize_email);
    let users = &state.repos.users;
    users.find_by_id(id).await?.ok_or_else(user_not_found)?;
    let user = users
        .update(id, &input)
        .await
        .map_err(not_found_as(ENTITY))?
        .ok_or_else(user_not_found)?;
    Ok(Json(user))
}

/// DELETE /users/{id}
///
/// Sessions belonging to the user are revoked first.
pub async fn delete(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<StatusCode> {
    let users = &state.repos.users;
    users.find_by_id(id).await?.ok_or_else(user_not_found)?;

    let revoked = state.repos.sessions.delete_for_user(id).await?;
    if !users.delete(id).await.map_err(not_found_as(ENTITY))? {
        return Err(user_not_found());
    }
    tracing::info!(user_id = %id, revoked, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
