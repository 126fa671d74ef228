//! Handlers for `/api/auth` (email sign-up, sign-in, sign-out, session).
//!
//! Sessions are opaque bearer tokens. The plaintext token is returned once
//! in [`AuthResponse`]; only its hash is stored.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use planvision_core::error::CoreError;
use planvision_db::models::session::CreateSession;
use planvision_db::models::user::{CreateUser, User};
use planvision_db::repositories::{CrudRepository, SessionRepository, UserRepository};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::normalize_email;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::resolver::{bearer_token, ResolvedSession};
use crate::auth::token::{generate_session_token, hash_session_token};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::guard::RequireSession;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/sign-up/email`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Request body for `POST /api/auth/sign-in/email`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Returned by sign-up and sign-in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    pub user: User,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/sign-up/email
pub async fn sign_up_email(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SignUpRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let email = normalize_email(&input.email);
    if state.repos.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .repos
        .users
        .create(&CreateUser {
            email,
            name: input.name,
        })
        .await?;
    state
        .repos
        .users
        .set_password_hash(user.id, &password_hash)
        .await?;

    tracing::info!(user_id = %user.id, "User signed up");
    let response = create_auth_response(&state, user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/sign-in/email
pub async fn sign_in_email(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SignInRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let email = normalize_email(&input.email);
    let user = state
        .repos
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(invalid)?;

    let password_hash = state
        .repos
        .users
        .find_password_hash(user.id)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = %user.id, "Sign-in rejected: wrong password");
        return Err(invalid());
    }

    tracing::info!(user_id = %user.id, "User signed in");
    Ok(Json(create_auth_response(&state, user).await?))
}

/// POST /api/auth/sign-out
///
/// Deletes the presented session. Always 204, even without a valid token.
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> AppResult<StatusCode> {
    if let Some(token) = bearer_token(&headers) {
        let removed = state
            .repos
            .sessions
            .delete_by_token_hash(&hash_session_token(token))
            .await?;
        tracing::debug!(removed, "Sign-out");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/get-session
pub async fn get_session(RequireSession(session): RequireSession) -> Json<ResolvedSession> {
    Json(session)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a token, persist its session row, and build the response.
async fn create_auth_response(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let (token, token_hash) = generate_session_token();
    let expires_at = Utc::now() + chrono::Duration::days(state.config.session_ttl_days);

    state
        .repos
        .sessions
        .create(&CreateSession {
            user_id: user.id,
            token_hash,
            expires_at,
        })
        .await?;

    Ok(AuthResponse { token, user })
}
