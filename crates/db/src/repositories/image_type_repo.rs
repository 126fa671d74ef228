//! Repository for the `image_types` table.

use async_trait::async_trait;
use planvision_core::types::DbId;
use sqlx::PgPool;

use super::CrudRepository;
use crate::error::DbError;
use crate::models::image_type::{CreateImageType, ImageType, UpdateImageType};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, label, value, description, created_at, updated_at";

/// Postgres CRUD operations for image types.
pub struct ImageTypeRepo {
    pool: PgPool,
}

impl ImageTypeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<ImageType, CreateImageType, UpdateImageType> for ImageTypeRepo {
    async fn create(&self, input: &CreateImageType) -> Result<ImageType, DbError> {
        let query = format!(
            "INSERT INTO image_types (label, value, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ImageType>(&query)
            .bind(&input.label)
            .bind(&input.value)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<ImageType>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM image_types ORDER BY id ASC");
        let rows = sqlx::query_as::<_, ImageType>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<ImageType>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM image_types WHERE id = $1");
        let row = sqlx::query_as::<_, ImageType>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateImageType,
    ) -> Result<Option<ImageType>, DbError> {
        let query = format!(
            "UPDATE image_types SET
                label = COALESCE($2, label),
                value = COALESCE($3, value),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ImageType>(&query)
            .bind(id)
            .bind(&input.label)
            .bind(&input.value)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|d| d.as_deref()))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM image_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
