//! Repository for the `users` and `user_credentials` tables.

use async_trait::async_trait;
use planvision_core::types::DbId;
use sqlx::PgPool;

use super::{CrudRepository, UserRepository};
use crate::error::DbError;
use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, created_at, updated_at";

/// Postgres operations for users and their password credentials.
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<User, CreateUser, UpdateUser> for UserRepo {
    async fn create(&self, input: &CreateUser) -> Result<User, DbError> {
        let query = format!(
            "INSERT INTO users (email, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id ASC");
        let users = sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn update(&self, id: DbId, input: &UpdateUser) -> Result<Option<User>, DbError> {
        let query = format!(
            "UPDATE users SET
                email = COALESCE($2, email),
                name = COALESCE($3, name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn delete(&self, id: DbId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserRepository for UserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn set_password_hash(&self, user_id: DbId, password_hash: &str) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO user_credentials (user_id, password_hash)
             VALUES ($1, $2)
             ON CONFLICT (user_id)
             DO UPDATE SET password_hash = EXCLUDED.password_hash, updated_at = NOW()",
        )
        .bind(user_id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_password_hash(&self, user_id: DbId) -> Result<Option<String>, DbError> {
        let hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM user_credentials WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(hash)
    }
}
