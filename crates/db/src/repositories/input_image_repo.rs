//! Repository for the `input_images` table.

use async_trait::async_trait;
use planvision_core::types::DbId;
use sqlx::PgPool;

use super::CrudRepository;
use crate::error::DbError;
use crate::models::input_image::{CreateInputImage, InputImage, UpdateInputImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, url, user_id, created_at";

/// Postgres CRUD operations for input images.
pub struct InputImageRepo {
    pool: PgPool,
}

impl InputImageRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<InputImage, CreateInputImage, UpdateInputImage> for InputImageRepo {
    async fn create(&self, input: &CreateInputImage) -> Result<InputImage, DbError> {
        let query = format!(
            "INSERT INTO input_images (url, user_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, InputImage>(&query)
            .bind(&input.url)
            .bind(input.user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<InputImage>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM input_images ORDER BY id ASC");
        let rows = sqlx::query_as::<_, InputImage>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<InputImage>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM input_images WHERE id = $1");
        let row = sqlx::query_as::<_, InputImage>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateInputImage,
    ) -> Result<Option<InputImage>, DbError> {
        let query = format!(
            "UPDATE input_images SET url = COALESCE($2, url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, InputImage>(&query)
            .bind(id)
            .bind(&input.url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM input_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
