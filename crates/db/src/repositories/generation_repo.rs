//! Repository for the `generations` table.

use async_trait::async_trait;
use planvision_core::types::DbId;
use sqlx::PgPool;

use super::{CrudRepository, GenerationRepository};
use crate::error::DbError;
use crate::models::generation::{CreateGeneration, Generation, GenerationRow, UpdateGeneration};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, render_config_id, status, output_image_url, error_message, \
                       created_at, updated_at";

/// Postgres operations for generation jobs.
pub struct GenerationRepo {
    pool: PgPool,
}

impl GenerationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode_all(rows: Vec<GenerationRow>) -> Result<Vec<Generation>, DbError> {
    rows.into_iter().map(Generation::try_from).collect()
}

#[async_trait]
impl CrudRepository<Generation, CreateGeneration, UpdateGeneration> for GenerationRepo {
    async fn create(&self, input: &CreateGeneration) -> Result<Generation, DbError> {
        let query = format!(
            "INSERT INTO generations (render_config_id, status)
             VALUES ($1, 'pending')
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, GenerationRow>(&query)
            .bind(input.render_config_id)
            .fetch_one(&self.pool)
            .await?;
        Generation::try_from(row)
    }

    async fn list(&self) -> Result<Vec<Generation>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM generations ORDER BY id ASC");
        let rows = sqlx::query_as::<_, GenerationRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        decode_all(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Generation>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM generations WHERE id = $1");
        let row = sqlx::query_as::<_, GenerationRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Generation::try_from).transpose()
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateGeneration,
    ) -> Result<Option<Generation>, DbError> {
        let query = format!(
            "UPDATE generations SET
                status = $2,
                output_image_url = COALESCE($3, output_image_url),
                error_message = COALESCE($4, error_message),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, GenerationRow>(&query)
            .bind(id)
            .bind(input.status.as_str())
            .bind(&input.output_image_url)
            .bind(&input.error_message)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Generation::try_from).transpose()
    }

    async fn delete(&self, id: DbId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM generations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl GenerationRepository for GenerationRepo {
    async fn list_by_render_config(
        &self,
        render_config_id: DbId,
    ) -> Result<Vec<Generation>, DbError> {
        let query = format!(
            "SELECT {COLUMNS} FROM generations
             WHERE render_config_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, GenerationRow>(&query)
            .bind(render_config_id)
            .fetch_all(&self.pool)
            .await?;
        decode_all(rows)
    }
}
