pub mod auth;
pub mod generation;
pub mod image_type;
pub mod input_image;
pub mod project;
pub mod render_config;
pub mod style;
pub mod user;

use planvision_core::error::CoreError;
use planvision_core::types::DbId;
use planvision_db::repositories::CrudRepository;
use planvision_db::DbError;

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Emails are stored and looked up trimmed and lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Re-map a row vanishing between the existence check and the write onto
/// the entity's own 404.
fn not_found_as(entity: &'static str) -> impl FnOnce(DbError) -> AppError {
    move |err| match err {
        DbError::NotFound => AppError::Core(CoreError::not_found(entity)),
        other => AppError::Database(other),
    }
}

/// Load a row or fail with `"{entity} not found"`.
async fn find_or_404<T, C, U>(
    repo: &dyn CrudRepository<T, C, U>,
    id: DbId,
    entity: &'static str,
) -> AppResult<T> {
    repo.find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(entity)))
}

/// Existence check, then partial patch.
async fn update_or_404<T, C, U>(
    repo: &dyn CrudRepository<T, C, U>,
    id: DbId,
    input: &U,
    entity: &'static str,
) -> AppResult<T> {
    find_or_404(repo, id, entity).await?;
    repo.update(id, input)
        .await
        .map_err(not_found_as(entity))?
        .ok_or(AppError::Core(CoreError::not_found(entity)))
}

/// Existence check, then delete. Rows still referenced elsewhere yield 409.
async fn delete_or_404<T, C, U>(
    repo: &dyn CrudRepository<T, C, U>,
    id: DbId,
    entity: &'static str,
) -> AppResult<()> {
    find_or_404(repo, id, entity).await?;
    let deleted = repo.delete(id).await.map_err(|err| match err {
        DbError::ForeignKeyViolation(constraint) => AppError::Core(CoreError::Conflict(format!(
            "{entity} is still referenced ({constraint})"
        ))),
        other => not_found_as(entity)(other),
    })?;
    if deleted {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::not_found(entity)))
    }
}
