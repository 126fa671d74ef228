//! Handlers for the `/styles` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use planvision_core::types::DbId;
use planvision_db::models::style::{CreateStyle, Style, UpdateStyle};
use planvision_db::repositories::CrudRepository;
use serde::Deserialize;

use super::{delete_or_404, find_or_404, update_or_404};
use crate::error::AppResult;
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::guard::RequireSession;
use crate::state::AppState;

const ENTITY: &str = "Style";

/// Query parameters for `GET /styles`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleQuery {
    /// Only styles offered for this image type (universal styles included).
    pub image_type_id: Option<DbId>,
}

/// POST /styles
pub async fn create(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedJson(input): ValidatedJson<CreateStyle>,
) -> AppResult<(StatusCode, Json<Style>)> {
    let style = state.repos.styles.create(&input).await?;
    Ok((StatusCode::CREATED, Json(style)))
}

/// GET /styles?imageTypeId=
pub async fn list(
    State(state): State<AppState>,
    _session: RequireSession,
    Query(query): Query<StyleQuery>,
) -> AppResult<Json<Vec<Style>>> {
    let styles = state
        .repos
        .styles
        .list()
        .await?
        .into_iter()
        .filter(|style| style.applies_to(query.image_type_id))
        .collect();
    Ok(Json(styles))
}

/// GET /styles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<Json<Style>> {
    Ok(Json(find_or_404(state.repos.styles.as_ref(), id, ENTITY).await?))
}

/// PATCH /styles/{id}
pub async fn update(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateStyle>,
) -> AppResult<Json<Style>> {
    Ok(Json(
        update_or_404(state.repos.styles.as_ref(), id, &input, ENTITY).await?,
    ))
}

/// DELETE /styles/{id}
pub async fn delete(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<StatusCode> {
    delete_or_404(state.repos.styles.as_ref(), id, ENTITY).await?;
    Ok(StatusCode::NO_CONTENT)
}
