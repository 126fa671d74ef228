//! Style entity model and DTOs.

use planvision_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `styles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub id: DbId,
    pub name: String,
    pub thumbnail_url: String,
    pub prompt_fragment: String,
    /// Image types this style is offered for. Empty means all of them.
    pub image_type_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Style {
    pub fn applies_to(&self, image_type_id: Option<DbId>) -> bool {
        planvision_core::style::applies_to(&self.image_type_ids, image_type_id)
    }
}

/// DTO for creating a new style.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStyle {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(url, length(max = 2048))]
    pub thumbnail_url: String,
    #[validate(length(min = 1, max = 2000))]
    pub prompt_fragment: String,
    #[serde(default)]
    pub image_type_ids: Vec<DbId>,
}

/// DTO for updating an existing style. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStyle {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(url, length(max = 2048))]
    pub thumbnail_url: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub prompt_fragment: Option<String>,
    pub image_type_ids: Option<Vec<DbId>>,
}
