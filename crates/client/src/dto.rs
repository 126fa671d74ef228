//! Wire shapes of the REST API.
//!
//! Fields the server may omit are `Option`; URLs stay strings until they are
//! mapped into [`crate::domain`].

use planvision_core::generation::GenerationStatus;
use planvision_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::domain::AuthUser;

/// Returned by sign-in and sign-up.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponseDto {
    pub token: String,
    pub user: AuthUser,
}

/// Returned by `GET /api/auth/get-session`. Only the user is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionDto {
    pub user: AuthUser,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTypeDto {
    pub id: DbId,
    pub label: String,
    pub value: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDto {
    pub id: DbId,
    pub name: String,
    pub thumbnail_url: Option<String>,
    pub prompt_fragment: Option<String>,
    #[serde(default)]
    pub image_type_ids: Vec<DbId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: DbId,
    pub name: String,
    pub user_id: Option<DbId>,
}

/// Showcase entry pairing an input plan with a finished render.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTemplateDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub original_thumbnail_url: Option<String>,
    pub rendered_thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfigDto {
    pub id: DbId,
    pub project_id: DbId,
    pub input_image_id: DbId,
    pub image_type_id: DbId,
    pub style_id: Option<DbId>,
    pub colors: Option<Vec<String>>,
    pub perspective: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStatusDto {
    pub id: DbId,
    pub render_config_id: DbId,
    pub status: GenerationStatus,
    pub output_image_url: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputImageDto {
    pub id: DbId,
    pub url: String,
    pub user_id: DbId,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateInputImageRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRenderConfigRequest {
    pub project_id: DbId,
    pub input_image_id: DbId,
    pub image_type_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perspective: Option<String>,
}
