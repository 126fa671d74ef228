//! Render config entity model and DTOs.

use planvision_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A row from the `render_configs` table: the parameters of one render request.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    pub id: DbId,
    pub project_id: DbId,
    pub input_image_id: DbId,
    pub image_type_id: DbId,
    pub style_id: Option<DbId>,
    pub colors: Option<Vec<String>>,
    pub perspective: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new render config.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRenderConfig {
    pub project_id: DbId,
    pub input_image_id: DbId,
    pub image_type_id: DbId,
    pub style_id: Option<DbId>,
    #[validate(length(max = 10), custom(function = "validate_hex_colors"))]
    pub colors: Option<Vec<String>>,
    #[validate(length(min = 1, max = 50))]
    pub perspective: Option<String>,
}

/// DTO for updating an existing render config. Absent fields are left
/// unchanged; `null` clears `styleId`, `colors` or `perspective`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRenderConfig {
    pub project_id: Option<DbId>,
    pub input_image_id: Option<DbId>,
    pub image_type_id: Option<DbId>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub style_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "super::nullable")]
    #[validate(length(max = 10), custom(function = "validate_hex_colors"))]
    pub colors: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "super::nullable")]
    #[validate(length(min = 1, max = 50))]
    pub perspective: Option<Option<String>>,
}

/// Accepts `RGB`, `RRGGBB`, `#RGB` and `#RRGGBB`.
pub fn is_hex_color(value: &str) -> bool {
    let digits = value.strip_prefix('#').unwrap_or(value);
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[allow(clippy::ptr_arg)]
fn validate_hex_colors(colors: &Vec<String>) -> Result<(), ValidationError> {
    if colors.iter().all(|c| is_hex_color(c)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("colors must be hex strings such as #A1B2C3".into());
        Err(err)
    }
}
