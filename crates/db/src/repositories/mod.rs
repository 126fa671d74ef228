//! Repository layer.
//!
//! Every entity is reached through a [`CrudRepository`] trait object so the
//! HTTP layer never depends on a concrete storage engine. Two engines exist:
//! the Postgres repositories in this module's `*_repo` files, and the
//! in-memory engine in [`memory`].

pub mod generation_repo;
pub mod image_type_repo;
pub mod input_image_repo;
pub mod memory;
pub mod project_repo;
pub mod render_config_repo;
pub mod session_repo;
pub mod style_repo;
pub mod user_repo;

use std::sync::Arc;

use async_trait::async_trait;
use planvision_core::types::DbId;

use crate::error::DbError;
use crate::models::generation::{CreateGeneration, Generation, UpdateGeneration};
use crate::models::image_type::{CreateImageType, ImageType, UpdateImageType};
use crate::models::input_image::{CreateInputImage, InputImage, UpdateInputImage};
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::models::render_config::{CreateRenderConfig, RenderConfig, UpdateRenderConfig};
use crate::models::session::{CreateSession, Session};
use crate::models::style::{CreateStyle, Style, UpdateStyle};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::DbPool;

pub use generation_repo::GenerationRepo;
pub use image_type_repo::ImageTypeRepo;
pub use input_image_repo::InputImageRepo;
pub use project_repo::ProjectRepo;
pub use render_config_repo::RenderConfigRepo;
pub use session_repo::SessionRepo;
pub use style_repo::StyleRepo;
pub use user_repo::UserRepo;

/// Uniform create/read/update/delete contract shared by every entity.
///
/// `C` is the create DTO and `U` the partial-update DTO of entity `T`.
#[async_trait]
pub trait CrudRepository<T, C, U>: Send + Sync {
    /// Insert a new row, returning it.
    async fn create(&self, input: &C) -> Result<T, DbError>;

    /// All rows ordered by id ascending.
    async fn list(&self) -> Result<Vec<T>, DbError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<T>, DbError>;

    /// Apply the non-`None` fields of `input`. `None` when no row matched.
    async fn update(&self, id: DbId, input: &U) -> Result<Option<T>, DbError>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, DbError>;
}

/// Users plus their password credentials.
#[async_trait]
pub trait UserRepository: CrudRepository<User, CreateUser, UpdateUser> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError>;

    /// Insert or replace the password hash for a user.
    async fn set_password_hash(&self, user_id: DbId, password_hash: &str) -> Result<(), DbError>;

    async fn find_password_hash(&self, user_id: DbId) -> Result<Option<String>, DbError>;
}

/// Bearer-token sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, input: &CreateSession) -> Result<Session, DbError>;

    /// Find an unexpired session by the hash of its token.
    async fn find_active_by_token_hash(&self, token_hash: &str)
        -> Result<Option<Session>, DbError>;

    /// Returns `true` if a session was removed.
    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<bool, DbError>;

    /// Remove every session belonging to a user. Returns the count removed.
    async fn delete_for_user(&self, user_id: DbId) -> Result<u64, DbError>;

    /// Remove expired sessions. Returns the count removed.
    async fn delete_expired(&self) -> Result<u64, DbError>;
}

/// Generation jobs, additionally listable per render config.
#[async_trait]
pub trait GenerationRepository:
    CrudRepository<Generation, CreateGeneration, UpdateGeneration>
{
    async fn list_by_render_config(&self, render_config_id: DbId)
        -> Result<Vec<Generation>, DbError>;
}

pub type ImageTypeStore = Arc<dyn CrudRepository<ImageType, CreateImageType, UpdateImageType>>;
pub type ProjectStore = Arc<dyn CrudRepository<Project, CreateProject, UpdateProject>>;
pub type RenderConfigStore =
    Arc<dyn CrudRepository<RenderConfig, CreateRenderConfig, UpdateRenderConfig>>;
pub type InputImageStore = Arc<dyn CrudRepository<InputImage, CreateInputImage, UpdateInputImage>>;
pub type StyleStore = Arc<dyn CrudRepository<Style, CreateStyle, UpdateStyle>>;

/// The full set of repositories, chosen once at the composition root.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub image_types: ImageTypeStore,
    pub projects: ProjectStore,
    pub render_configs: RenderConfigStore,
    pub input_images: InputImageStore,
    pub styles: StyleStore,
    pub generations: Arc<dyn GenerationRepository>,
    pool: Option<DbPool>,
}

impl Repositories {
    /// Postgres-backed repositories sharing one pool.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            users: Arc::new(UserRepo::new(pool.clone())),
            sessions: Arc::new(SessionRepo::new(pool.clone())),
            image_types: Arc::new(ImageTypeRepo::new(pool.clone())),
            projects: Arc::new(ProjectRepo::new(pool.clone())),
            render_configs: Arc::new(RenderConfigRepo::new(pool.clone())),
            input_images: Arc::new(InputImageRepo::new(pool.clone())),
            styles: Arc::new(StyleRepo::new(pool.clone())),
            generations: Arc::new(GenerationRepo::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Process-local repositories with no persistence. Used by tests and demos.
    pub fn in_memory() -> Self {
        let tables = memory::MemoryTables::shared();
        Self {
            users: Arc::new(memory::MemoryRepo::<User>::new(tables.clone())),
            sessions: Arc::new(memory::MemorySessionRepo::new(tables.clone())),
            image_types: Arc::new(memory::MemoryRepo::<ImageType>::new(tables.clone())),
            projects: Arc::new(memory::MemoryRepo::<Project>::new(tables.clone())),
            render_configs: Arc::new(memory::MemoryRepo::<RenderConfig>::new(tables.clone())),
            input_images: Arc::new(memory::MemoryRepo::<InputImage>::new(tables.clone())),
            styles: Arc::new(memory::MemoryRepo::<Style>::new(tables.clone())),
            generations: Arc::new(memory::MemoryRepo::<Generation>::new(tables)),
            pool: None,
        }
    }

    /// Check that the backing engine is reachable. Always healthy in memory.
    pub async fn health_check(&self) -> Result<(), DbError> {
        match &self.pool {
            Some(pool) => crate::health_check(pool).await.map_err(DbError::from),
            None => Ok(()),
        }
    }
}
