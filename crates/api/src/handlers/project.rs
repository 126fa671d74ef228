//! Handlers for the `/projects` resource.
//!
//! The creating user is recorded on the project but not used for access
//! checks: any authenticated session may read or modify any project.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use planvision_core::types::DbId;
use planvision_db::models::project::{CreateProject, Project, UpdateProject};
use planvision_db::repositories::CrudRepository;

use super::{delete_or_404, find_or_404, update_or_404};
use crate::error::AppResult;
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::guard::RequireSession;
use crate::state::AppState;

const ENTITY: &str = "Project";

/// POST /projects
///
/// Overrides `input.user_id` with the session's user.
pub async fn create(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
    ValidatedJson(mut input): ValidatedJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.user_id = Some(session.user.id);
    let project = state.repos.projects.create(&input).await?;
    tracing::info!(project_id = %project.id, user_id = %session.user.id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /projects
pub async fn list(
    State(state): State<AppState>,
    _session: RequireSession,
) -> AppResult<Json<Vec<Project>>> {
    Ok(Json(state.repos.projects.list().await?))
}

/// GET /projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<Json<Project>> {
    Ok(Json(find_or_404(state.repos.projects.as_ref(), id, ENTITY).await?))
}

/// PATCH /projects/{id}
pub async fn update(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = update_or_404(state.repos.projects.as_ref(), id, &input, ENTITY).await?;
    Ok(Json(project))
}

/// DELETE /projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<StatusCode> {
    delete_or_404(state.repos.projects.as_ref(), id, ENTITY).await?;
    Ok(StatusCode::NO_CONTENT)
}
