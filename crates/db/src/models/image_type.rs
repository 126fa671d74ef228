//! Image type entity model and DTOs.

use planvision_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `image_types` table, e.g. `floor_plan_2d`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageType {
    pub id: DbId,
    pub label: String,
    /// Machine-readable key, unique across image types.
    pub value: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new image type.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageType {
    #[validate(length(min = 1, max = 100))]
    pub label: String,
    #[validate(length(min = 1, max = 100))]
    pub value: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// DTO for updating an existing image type. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImageType {
    #[validate(length(min = 1, max = 100))]
    pub label: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub value: Option<String>,
    /// `null` clears the description.
    #[serde(default, deserialize_with = "super::nullable")]
    #[validate(length(max = 500))]
    pub description: Option<Option<String>>,
}
