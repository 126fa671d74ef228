//! Repository for the `styles` table.

use async_trait::async_trait;
use planvision_core::types::DbId;
use sqlx::PgPool;

use super::CrudRepository;
use crate::error::DbError;
use crate::models::style::{CreateStyle, Style, UpdateStyle};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, thumbnail_url, prompt_fragment, image_type_ids, created_at, updated_at";

/// Postgres CRUD operations for styles.
pub struct StyleRepo {
    pool: PgPool,
}

impl StyleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<Style, CreateStyle, UpdateStyle> for StyleRepo {
    async fn create(&self, input: &CreateStyle) -> Result<Style, DbError> {
        let query = format!(
            "INSERT INTO styles (name, thumbnail_url, prompt_fragment, image_type_ids)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Style>(&query)
            .bind(&input.name)
            .bind(&input.thumbnail_url)
            .bind(&input.prompt_fragment)
            .bind(&input.image_type_ids)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Style>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM styles ORDER BY id ASC");
        let rows = sqlx::query_as::<_, Style>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Style>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM styles WHERE id = $1");
        let row = sqlx::query_as::<_, Style>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: DbId, input: &UpdateStyle) -> Result<Option<Style>, DbError> {
        let query = format!(
            "UPDATE styles SET
                name = COALESCE($2, name),
                thumbnail_url = COALESCE($3, thumbnail_url),
                prompt_fragment = COALESCE($4, prompt_fragment),
                image_type_ids = COALESCE($5, image_type_ids),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Style>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.thumbnail_url)
            .bind(&input.prompt_fragment)
            .bind(&input.image_type_ids)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM styles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
