//! Handlers for render generations.
//!
//! Generations are created `pending` by the client and advanced by the
//! external generation worker through `PATCH /generations/{id}`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use planvision_core::error::CoreError;
use planvision_core::generation::validate_transition;
use planvision_core::types::DbId;
use planvision_db::models::generation::{CreateGeneration, Generation, UpdateGeneration};
use planvision_db::repositories::{CrudRepository, GenerationRepository};

use super::{find_or_404, not_found_as};
use crate::error::{AppError, AppResult};
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::guard::RequireSession;
use crate::state::AppState;

const ENTITY: &str = "Generation";

/// POST /render-configs/{id}/generations
pub async fn create(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(render_config_id): ValidatedPath<DbId>,
) -> AppResult<(StatusCode, Json<Generation>)> {
    find_or_404(
        state.repos.render_configs.as_ref(),
        render_config_id,
        "RenderConfig",
    )
    .await?;

    let generation = state
        .repos
        .generations
        .create(&CreateGeneration { render_config_id })
        .await?;
    tracing::info!(generation_id = %generation.id, %render_config_id, "Generation queued");
    Ok((StatusCode::CREATED, Json(generation)))
}

/// GET /render-configs/{id}/generations
pub async fn list_by_render_config(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(render_config_id): ValidatedPath<DbId>,
) -> AppResult<Json<Vec<Generation>>> {
    find_or_404(
        state.repos.render_configs.as_ref(),
        render_config_id,
        "RenderConfig",
    )
    .await?;
    let generations = state
        .repos
        .generations
        .list_by_render_config(render_config_id)
        .await?;
    Ok(Json(generations))
}

/// GET /generations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<Json<Generation>> {
    let generation = state
        .repos
        .generations
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(ENTITY)))?;
    Ok(Json(generation))
}

/// PATCH /generations/{id}
///
/// Rejects transitions out of a terminal status with 400.
pub async fn update(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateGeneration>,
) -> AppResult<Json<Generation>> {
    let repo = &state.repos.generations;
    let current = repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(ENTITY)))?;
    validate_transition(current.status, input.status)?;

    let generation = repo
        .update(id, &input)
        .await
        .map_err(not_found_as(ENTITY))?
        .ok_or(AppError::Core(CoreError::not_found(ENTITY)))?;
    tracing::info!(
        generation_id = %id,
        from = %current.status,
        to = %generation.status,
        "Generation status updated",
    );
    Ok(Json(generation))
}
