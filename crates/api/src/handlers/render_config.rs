//! Handlers for the `/render-configs` resource.
//!
//! A render config must reference an existing project, input image and image
//! type, plus a style when `styleId` is given. References are checked before
//! every write that sets them.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use planvision_core::types::DbId;
use planvision_db::models::render_config::{
    CreateRenderConfig, RenderConfig, UpdateRenderConfig,
};
use planvision_db::repositories::CrudRepository;

use super::{delete_or_404, find_or_404, update_or_404};
use crate::error::AppResult;
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::guard::RequireSession;
use crate::state::AppState;

const ENTITY: &str = "RenderConfig";

/// Fail with the referenced entity's 404 for the first missing reference.
async fn check_references(
    state: &AppState,
    project_id: Option<DbId>,
    input_image_id: Option<DbId>,
    image_type_id: Option<DbId>,
    style_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(id) = project_id {
        find_or_404(state.repos.projects.as_ref(), id, "Project").await?;
    }
    if let Some(id) = input_image_id {
        find_or_404(state.repos.input_images.as_ref(), id, "InputImage").await?;
    }
    if let Some(id) = image_type_id {
        find_or_404(state.repos.image_types.as_ref(), id, "ImageType").await?;
    }
    if let Some(id) = style_id {
        find_or_404(state.repos.styles.as_ref(), id, "Style").await?;
    }
    Ok(())
}

/// POST /render-configs
pub async fn create(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedJson(input): ValidatedJson<CreateRenderConfig>,
) -> AppResult<(StatusCode, Json<RenderConfig>)> {
    check_references(
        &state,
        Some(input.project_id),
        Some(input.input_image_id),
        Some(input.image_type_id),
        input.style_id,
    )
    .await?;

    let render_config = state.repos.render_configs.create(&input).await?;
    tracing::info!(
        render_config_id = %render_config.id,
        project_id = %render_config.project_id,
        "Render config created",
    );
    Ok((StatusCode::CREATED, Json(render_config)))
}

/// GET /render-configs
pub async fn list(
    State(state): State<AppState>,
    _session: RequireSession,
) -> AppResult<Json<Vec<RenderConfig>>> {
    Ok(Json(state.repos.render_configs.list().await?))
}

/// GET /render-configs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<Json<RenderConfig>> {
    Ok(Json(
        find_or_404(state.repos.render_configs.as_ref(), id, ENTITY).await?,
    ))
}

/// PATCH /render-configs/{id}
pub async fn update(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateRenderConfig>,
) -> AppResult<Json<RenderConfig>> {
    find_or_404(state.repos.render_configs.as_ref(), id, ENTITY).await?;
    check_references(
        &state,
        input.project_id,
        input.input_image_id,
        input.image_type_id,
        input.style_id.flatten(),
    )
    .await?;

    let render_config =
        update_or_404(state.repos.render_configs.as_ref(), id, &input, ENTITY).await?;
    Ok(Json(render_config))
}

/// DELETE /render-configs/{id}
pub async fn delete(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<StatusCode> {
    delete_or_404(state.repos.render_configs.as_ref(), id, ENTITY).await?;
    Ok(StatusCode::NO_CONTENT)
}
