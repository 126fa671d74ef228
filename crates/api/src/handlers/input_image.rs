//! Handlers for the `/input-images` resource.
//!
//! Images arrive either as an already-hosted URL (`POST /input-images`) or as
//! a multipart upload that is stored in the bucket first
//! (`POST /input-images/upload`).

use std::time::Duration;

use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use planvision_core::types::{DbId, Timestamp};
use planvision_db::models::input_image::{CreateInputImage, InputImage, UpdateInputImage};
use planvision_db::repositories::CrudRepository;
use planvision_storage::UploadedFile;
use serde::{Deserialize, Serialize};

use super::{delete_or_404, find_or_404, update_or_404};
use crate::error::{AppError, AppResult};
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::guard::RequireSession;
use crate::state::AppState;

const ENTITY: &str = "InputImage";

/// Bucket folder holding uploaded input images.
const UPLOAD_FOLDER: &str = "input-images";

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// Signed URL lifetime when `ttlSecs` is not given (15 minutes).
const DEFAULT_SIGNED_URL_TTL_SECS: u64 = 15 * 60;

/// Query parameters for `GET /input-images/{id}/signed-url`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlQuery {
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlResponse {
    pub url: String,
    pub expires_at: Timestamp,
}

/// POST /input-images
///
/// Registers an already-hosted image for the session's user.
pub async fn create(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
    ValidatedJson(mut input): ValidatedJson<CreateInputImage>,
) -> AppResult<(StatusCode, Json<InputImage>)> {
    input.user_id = session.user.id;
    let image = state.repos.input_images.create(&input).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// POST /input-images/upload
///
/// Stores the multipart `file` field in the bucket and records its public URL.
pub async fn upload(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<InputImage>)> {
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Read error: {e}")))?;
        file = Some(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let file = file.ok_or_else(|| {
        AppError::BadRequest(format!("Missing multipart field '{FILE_FIELD}'"))
    })?;

    let stored = state.storage.upload_file(file, UPLOAD_FOLDER).await?;

    let input = CreateInputImage {
        url: stored.url,
        user_id: session.user.id,
    };
    let image = match state.repos.input_images.create(&input).await {
        Ok(image) => image,
        Err(e) => {
            // Remove the orphaned object.
            if let Err(cleanup) = state.storage.delete(&stored.name).await {
                tracing::warn!(object_name = %stored.name, error = %cleanup, "Orphan cleanup failed");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        input_image_id = %image.id,
        user_id = %session.user.id,
        object_name = %stored.name,
        "Input image uploaded",
    );
    Ok((StatusCode::CREATED, Json(image)))
}

/// GET /input-images
pub async fn list(
    State(state): State<AppState>,
    _session: RequireSession,
) -> AppResult<Json<Vec<InputImage>>> {
    Ok(Json(state.repos.input_images.list().await?))
}

/// GET /input-images/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<Json<InputImage>> {
    Ok(Json(
        find_or_404(state.repos.input_images.as_ref(), id, ENTITY).await?,
    ))
}

/// PATCH /input-images/{id}
pub async fn update(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateInputImage>,
) -> AppResult<Json<InputImage>> {
    Ok(Json(
        update_or_404(state.repos.input_images.as_ref(), id, &input, ENTITY).await?,
    ))
}

/// DELETE /input-images/{id}
///
/// Also removes the stored object when the URL points into our bucket.
/// Object removal is best-effort: the row is gone either way.
pub async fn delete(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<StatusCode> {
    let image = find_or_404(state.repos.input_images.as_ref(), id, ENTITY).await?;
    delete_or_404(state.repos.input_images.as_ref(), id, ENTITY).await?;

    if let Some(object_name) = state.storage.object_name_from_url(&image.url) {
        if let Err(e) = state.storage.delete(&object_name).await {
            tracing::warn!(input_image_id = %id, %object_name, error = %e, "Stored object not removed");
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /input-images/{id}/signed-url?ttlSecs=
pub async fn signed_url(
    State(state): State<AppState>,
    _session: RequireSession,
    ValidatedPath(id): ValidatedPath<DbId>,
    Query(query): Query<SignedUrlQuery>,
) -> AppResult<Json<SignedUrlResponse>> {
    let image = find_or_404(state.repos.input_images.as_ref(), id, ENTITY).await?;
    let object_name = state.storage.object_name_from_url(&image.url).ok_or_else(|| {
        AppError::BadRequest("Input image is not stored in the configured bucket".into())
    })?;

    let ttl_secs = query.ttl_secs.unwrap_or(DEFAULT_SIGNED_URL_TTL_SECS);
    let url = state
        .storage
        .signed_url(&object_name, Duration::from_secs(ttl_secs))
        .await?;

    Ok(Json(SignedUrlResponse {
        url,
        expires_at: Utc::now() + chrono::Duration::seconds(ttl_secs as i64),
    }))
}
