//! Storage-engine-neutral repository errors.

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errors returned by every repository implementation.
///
/// The Postgres engine classifies raw [`sqlx::Error`]s into these variants so
/// that callers never inspect SQLSTATE codes themselves.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The row vanished between lookup and write.
    #[error("Row not found")]
    NotFound,

    /// A unique constraint rejected the write. Holds the constraint name.
    #[error("Duplicate value violates unique constraint: {0}")]
    UniqueViolation(String),

    /// A referenced row does not exist. Holds the constraint name.
    #[error("Referenced row does not exist: {0}")]
    ForeignKeyViolation(String),

    /// A stored value could not be decoded into its domain type.
    #[error("Corrupt row: {0}")]
    Decode(String),

    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(ref db_err) => {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                match db_err.code().as_deref() {
                    Some(UNIQUE_VIOLATION) => DbError::UniqueViolation(constraint),
                    Some(FOREIGN_KEY_VIOLATION) => DbError::ForeignKeyViolation(constraint),
                    _ => DbError::Sqlx(err),
                }
            }
            other => DbError::Sqlx(other),
        }
    }
}
