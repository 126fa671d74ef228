use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use planvision_core::error::CoreError;
use planvision_db::DbError;
use planvision_storage::StorageError;
use serde_json::{json, Map, Value};
use validator::{ValidationError, ValidationErrors};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `planvision_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A repository error from `planvision_db`.
    #[error(transparent)]
    Database(#[from] DbError),

    /// An object storage error from `planvision_storage`.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Field-level DTO validation failures.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut fields = None;

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Repository errors ---
            AppError::Database(err) => classify_db_error(err),

            // --- Storage errors ---
            AppError::Storage(err) => match err {
                StorageError::InvalidUpload(msg) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
                }
                StorageError::InvalidTtl { .. } => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string())
                }
                other => {
                    tracing::error!(error = %other, "Storage error");
                    internal()
                }
            },

            // --- HTTP-specific errors ---
            AppError::Validation(errors) => {
                fields = Some(field_messages(errors));
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Validation failed".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(fields) = fields {
            body["fields"] = fields;
        }

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Classify a repository error into an HTTP status, error code, and message.
///
/// - `NotFound` maps to 404.
/// - Unique constraint violations map to 409.
/// - Foreign key violations map to 404 (a referenced row is missing).
/// - Everything else maps to 500 with a sanitized message.
fn classify_db_error(err: &DbError) -> (StatusCode, &'static str, String) {
    match err {
        DbError::NotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        DbError::UniqueViolation(constraint) => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        DbError::ForeignKeyViolation(constraint) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("Referenced resource not found: {constraint}"),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

/// `{ "field": ["message", ...] }` for every failing field, keyed by the
/// camelCase wire name.
fn field_messages(errors: &ValidationErrors) -> Value {
    let fields: Map<String, Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs.iter().map(describe).collect();
            (camel_case(&field), json!(messages))
        })
        .collect();
    Value::Object(fields)
}

fn describe(err: &ValidationError) -> String {
    match &err.message {
        Some(message) => message.to_string(),
        None => format!("failed '{}' check", err.code),
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::camel_case;

    #[test]
    fn field_names_become_camel_case() {
        assert_eq!(camel_case("thumbnail_url"), "thumbnailUrl");
        assert_eq!(camel_case("image_type_ids"), "imageTypeIds");
        assert_eq!(camel_case("colors"), "colors");
        assert_eq!(camel_case("thumbnailUrl"), "thumbnailUrl");
    }
}
