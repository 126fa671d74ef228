//! Render generation model and DTOs.

use planvision_core::generation::GenerationStatus;
use planvision_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::DbError;

/// A generation job as exposed to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub id: DbId,
    pub render_config_id: DbId,
    pub status: GenerationStatus,
    pub output_image_url: Option<String>,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Raw `generations` row; `status` is stored as text.
#[derive(Debug, Clone, FromRow)]
pub struct GenerationRow {
    pub id: DbId,
    pub render_config_id: DbId,
    pub status: String,
    pub output_image_url: Option<String>,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<GenerationRow> for Generation {
    type Error = DbError;

    fn try_from(row: GenerationRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|_| DbError::Decode(format!("unknown generation status '{}'", row.status)))?;
        Ok(Generation {
            id: row.id,
            render_config_id: row.render_config_id,
            status,
            output_image_url: row.output_image_url,
            error_message: row.error_message,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// DTO for queuing a new generation. Always starts `pending`.
#[derive(Debug, Clone)]
pub struct CreateGeneration {
    pub render_config_id: DbId,
}

/// Status report from the generation worker.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGeneration {
    pub status: GenerationStatus,
    #[validate(url, length(max = 2048))]
    pub output_image_url: Option<String>,
    #[validate(length(max = 2000))]
    pub error_message: Option<String>,
}
