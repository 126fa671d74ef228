//! Handlers for the `/image-types` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use planvision_core::types::DbId;
use planvision_db::models::image_type::{CreateImageType, ImageType, UpdateImageType};
use planvision_db::repositories::CrudRepository;

use super::{delete_or_404, find_or_404, update_or_404};
use crate::error::AppResult;
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::guard::RequireSession;
use crate::state::AppState;

const ENTITY: &str = "ImageType";

/// POST /image-types
pub async fn create(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedJson(input): ValidatedJson<CreateImageType>,
) -> AppResult<(StatusCode, Json<ImageType>)> {
    let image_type = state.repos.image_types.create(&input).await?;
    tracing::info!(image_type_id = %image_type.id, value = %image_type.value, "Image type created");
    Ok((StatusCode::CREATED, Json(image_type)))
}

/// GET /image-types
pub async fn list(
    State(state): State<AppState>,
    _session: RequireSession,
) -> AppResult<Json<Vec<ImageType>>> {
    let image_types = state.repos.image_types.list().await?;
    Ok(Json(image_types))
}

/// GET /image-types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<Json<ImageType>> {
    let image_type = find_or_404(state.repos.image_types.as_ref(), id, ENTITY).await?;
    Ok(Json(image_type))
}

/// PATCH /image-types/{id}
pub async fn update(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateImageType>,
) -> AppResult<Json<ImageType>> {
    let image_type = update_or_404(state.repos.image_types.as_ref(), id, &input, ENTITY).await?;
    Ok(Json(image_type))
}

/// DELETE /image-types/{id}
pub async fn delete(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<StatusCode> {
    delete_or_404(state.repos.image_types.as_ref(), id, ENTITY).await?;
    tracing::info!(image_type_id = %id, "Image type deleted");
    Ok(StatusCode::NO_CONTENT)
}
