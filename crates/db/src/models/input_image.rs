//! Input image entity model and DTOs.

use planvision_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `input_images` table: an uploaded source photo or plan.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputImage {
    pub id: DbId,
    pub url: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for registering an already-hosted image.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInputImage {
    #[validate(url, length(max = 2048))]
    pub url: String,
    /// Filled from the request session, never from the body.
    #[serde(skip_deserializing)]
    pub user_id: DbId,
}

/// DTO for updating an existing input image.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInputImage {
    #[validate(url, length(max = 2048))]
    pub url: Option<String>,
}
