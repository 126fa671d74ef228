//! In-memory model the app works with.
//!
//! Built from [`crate::dto`] with `From`: optional text gets a default and
//! URLs are parsed, with malformed ones dropped rather than reported.

use planvision_core::generation::GenerationStatus;
use planvision_core::types::DbId;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::color::Rgba;
use crate::dto::{
    GenerationStatusDto, ImageTypeDto, InputImageDto, ProjectDto, ProjectTemplateDto,
    RenderConfigDto, StyleDto,
};

fn parse_url(raw: Option<&str>) -> Option<Url> {
    raw.and_then(|s| Url::parse(s.trim()).ok())
}

/// The signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageType {
    pub id: DbId,
    pub label: String,
    pub value: String,
    pub description: String,
}

impl From<ImageTypeDto> for ImageType {
    fn from(dto: ImageTypeDto) -> Self {
        Self {
            id: dto.id,
            label: dto.label,
            value: dto.value,
            description: dto.description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub id: DbId,
    pub name: String,
    pub thumbnail_url: Option<Url>,
    pub prompt_fragment: String,
    pub image_type_ids: Vec<DbId>,
}

impl Style {
    /// Whether this style can be offered for `image_type_id`.
    pub fn applies_to(&self, image_type_id: Option<DbId>) -> bool {
        planvision_core::style::applies_to(&self.image_type_ids, image_type_id)
    }
}

impl From<StyleDto> for Style {
    fn from(dto: StyleDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            thumbnail_url: parse_url(dto.thumbnail_url.as_deref()),
            prompt_fragment: dto.prompt_fragment.unwrap_or_default(),
            image_type_ids: dto.image_type_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub user_id: Option<DbId>,
}

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            user_id: dto.user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub original_thumbnail_url: Option<Url>,
    pub rendered_thumbnail_url: Option<Url>,
}

impl ProjectTemplate {
    /// Both halves of the before/after pair are available.
    pub fn has_comparison_images(&self) -> bool {
        self.original_thumbnail_url.is_some() && self.rendered_thumbnail_url.is_some()
    }
}

impl From<ProjectTemplateDto> for ProjectTemplate {
    fn from(dto: ProjectTemplateDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description.unwrap_or_default(),
            original_thumbnail_url: parse_url(dto.original_thumbnail_url.as_deref()),
            rendered_thumbnail_url: parse_url(dto.rendered_thumbnail_url.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputImage {
    pub id: DbId,
    pub url: Option<Url>,
    pub user_id: DbId,
}

impl From<InputImageDto> for InputImage {
    fn from(dto: InputImageDto) -> Self {
        Self {
            id: dto.id,
            url: parse_url(Some(&dto.url)),
            user_id: dto.user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub id: DbId,
    pub project_id: DbId,
    pub input_image_id: DbId,
    pub image_type_id: DbId,
    pub style_id: Option<DbId>,
    pub colors: Vec<Rgba>,
    pub perspective: Option<String>,
}

impl From<RenderConfigDto> for RenderConfig {
    fn from(dto: RenderConfigDto) -> Self {
        Self {
            id: dto.id,
            project_id: dto.project_id,
            input_image_id: dto.input_image_id,
            image_type_id: dto.image_type_id,
            style_id: dto.style_id,
            colors: dto
                .colors
                .unwrap_or_default()
                .iter()
                .map(|hex| Rgba::from_hex(hex))
                .collect(),
            perspective: dto.perspective,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub id: DbId,
    pub render_config_id: DbId,
    pub status: GenerationStatus,
    pub output_image_url: Option<Url>,
    pub error_message: Option<String>,
}

impl Generation {
    /// Polling can stop.
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }
}

impl From<GenerationStatusDto> for Generation {
    fn from(dto: GenerationStatusDto) -> Self {
        Self {
            id: dto.id,
            render_config_id: dto.render_config_id,
            status: dto.status,
            output_image_url: parse_url(dto.output_image_url.as_deref()),
            error_message: dto.error_message,
        }
    }
}
