//! Repository for the `render_configs` table.

use async_trait::async_trait;
use planvision_core::types::DbId;
use sqlx::PgPool;

use super::CrudRepository;
use crate::error::DbError;
use crate::models::render_config::{CreateRenderConfig, RenderConfig, UpdateRenderConfig};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, input_image_id, image_type_id, style_id, colors, \
                       perspective, created_at, updated_at";

/// Postgres CRUD operations for render configs.
pub struct RenderConfigRepo {
    pool: PgPool,
}

impl RenderConfigRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<RenderConfig, CreateRenderConfig, UpdateRenderConfig> for RenderConfigRepo {
    async fn create(&self, input: &CreateRenderConfig) -> Result<RenderConfig, DbError> {
        let query = format!(
            "INSERT INTO render_configs
                (project_id, input_image_id, image_type_id, style_id, colors, perspective)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, RenderConfig>(&query)
            .bind(input.project_id)
            .bind(input.input_image_id)
            .bind(input.image_type_id)
            .bind(input.style_id)
            .bind(&input.colors)
            .bind(&input.perspective)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<RenderConfig>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM render_configs ORDER BY id ASC");
        let rows = sqlx::query_as::<_, RenderConfig>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<RenderConfig>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM render_configs WHERE id = $1");
        let row = sqlx::query_as::<_, RenderConfig>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateRenderConfig,
    ) -> Result<Option<RenderConfig>, DbError> {
        let query = format!(
            "UPDATE render_configs SET
                project_id = COALESCE($2, project_id),
                input_image_id = COALESCE($3, input_image_id),
                image_type_id = COALESCE($4, image_type_id),
                style_id = CASE WHEN $5 THEN $6 ELSE style_id END,
                colors = CASE WHEN $7 THEN $8 ELSE colors END,
                perspective = CASE WHEN $9 THEN $10 ELSE perspective END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, RenderConfig>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(input.input_image_id)
            .bind(input.image_type_id)
            .bind(input.style_id.is_some())
            .bind(input.style_id.flatten())
            .bind(input.colors.is_some())
            .bind(input.colors.as_ref().and_then(|c| c.as_ref()))
            .bind(input.perspective.is_some())
            .bind(input.perspective.as_ref().and_then(|p| p.as_deref()))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM render_configs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
