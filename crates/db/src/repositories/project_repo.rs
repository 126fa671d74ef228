//! Repository for the `projects` table.

use async_trait::async_trait;
use planvision_core::types::DbId;
use sqlx::PgPool;

use super::CrudRepository;
use crate::error::DbError;
use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, user_id, created_at, updated_at";

/// Postgres CRUD operations for projects.
pub struct ProjectRepo {
    pool: PgPool,
}

impl ProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<Project, CreateProject, UpdateProject> for ProjectRepo {
    async fn create(&self, input: &CreateProject) -> Result<Project, DbError> {
        let query = format!(
            "INSERT INTO projects (name, user_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(input.user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(project)
    }

    async fn list(&self) -> Result<Vec<Project>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY id ASC");
        let projects = sqlx::query_as::<_, Project>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(projects)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn update(&self, id: DbId, input: &UpdateProject) -> Result<Option<Project>, DbError> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn delete(&self, id: DbId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
