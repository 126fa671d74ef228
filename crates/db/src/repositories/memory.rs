//! In-memory storage engine.
//!
//! Every table lives in one [`MemoryTables`] behind a single lock, so a
//! delete and its `ON DELETE` actions apply atomically. Rows are kept in a
//! `BTreeMap` keyed by id, so listing order matches the Postgres
//! `ORDER BY id ASC` queries. Unique and foreign-key constraints carry the
//! names the migrations declare, and deletes follow the same
//! `CASCADE` / `RESTRICT` / `SET NULL` rules.

use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use planvision_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CrudRepository, GenerationRepository, SessionRepository, UserRepository};
use crate::error::DbError;
use crate::models::generation::{CreateGeneration, Generation, UpdateGeneration};
use crate::models::image_type::{CreateImageType, ImageType, UpdateImageType};
use crate::models::input_image::{CreateInputImage, InputImage, UpdateInputImage};
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::models::render_config::{CreateRenderConfig, RenderConfig, UpdateRenderConfig};
use crate::models::session::{CreateSession, Session};
use crate::models::style::{CreateStyle, Style, UpdateStyle};
use crate::models::user::{CreateUser, UpdateUser, User};

/// All in-memory tables.
#[derive(Default)]
pub struct MemoryTables {
    users: BTreeMap<DbId, User>,
    credentials: HashMap<DbId, String>,
    sessions: BTreeMap<DbId, Session>,
    image_types: BTreeMap<DbId, ImageType>,
    projects: BTreeMap<DbId, Project>,
    input_images: BTreeMap<DbId, InputImage>,
    styles: BTreeMap<DbId, Style>,
    render_configs: BTreeMap<DbId, RenderConfig>,
    generations: BTreeMap<DbId, Generation>,
}

/// Handle shared by every in-memory repository of one [`Repositories`](super::Repositories).
pub type SharedTables = Arc<RwLock<MemoryTables>>;

impl MemoryTables {
    pub fn shared() -> SharedTables {
        Arc::new(RwLock::new(Self::default()))
    }

    /// Remove the render configs matching `doomed` and their generations.
    fn cascade_render_configs(&mut self, doomed: impl Fn(&RenderConfig) -> bool) {
        let ids: Vec<DbId> = self
            .render_configs
            .values()
            .filter(|rc| doomed(rc))
            .map(|rc| rc.id)
            .collect();
        for id in &ids {
            self.render_configs.remove(id);
        }
        self.generations
            .retain(|_, g| !ids.contains(&g.render_config_id));
    }
}

fn require_reference(exists: bool, constraint: &str) -> Result<(), DbError> {
    if exists {
        Ok(())
    } else {
        Err(DbError::ForeignKeyViolation(constraint.to_string()))
    }
}

/// How an entity is stored, built and patched by the in-memory engine.
pub trait MemoryRecord<C, U>: Clone + Send + Sync + 'static {
    fn id(&self) -> DbId;

    fn table(tables: &MemoryTables) -> &BTreeMap<DbId, Self>;

    fn table_mut(tables: &mut MemoryTables) -> &mut BTreeMap<DbId, Self>;

    fn from_create(id: DbId, now: Timestamp, input: &C) -> Self;

    fn apply_update(&mut self, input: &U, now: Timestamp);

    /// `(constraint name, key)` for entities with a unique column.
    fn unique_key(&self) -> Option<(&'static str, String)> {
        None
    }

    /// Every foreign key this row holds must point at an existing row.
    fn check_references(&self, _tables: &MemoryTables) -> Result<(), DbError> {
        Ok(())
    }

    /// `ON DELETE` actions for rows referencing `id`, run before it is removed.
    /// A `RESTRICT` failure must leave every table untouched.
    fn on_delete(_id: DbId, _tables: &mut MemoryTables) -> Result<(), DbError> {
        Ok(())
    }
}

/// Repository over a single in-memory table.
pub struct MemoryRepo<T> {
    tables: SharedTables,
    _entity: PhantomData<fn() -> T>,
}

impl<T> MemoryRepo<T> {
    pub fn new(tables: SharedTables) -> Self {
        Self {
            tables,
            _entity: PhantomData,
        }
    }
}

fn check_unique<T, C, U>(rows: &BTreeMap<DbId, T>, candidate: &T) -> Result<(), DbError>
where
    T: MemoryRecord<C, U>,
{
    let Some((constraint, key)) = candidate.unique_key() else {
        return Ok(());
    };
    let taken = rows.values().any(|row| {
        row.id() != candidate.id()
            && row
                .unique_key()
                .is_some_and(|(_, other)| other == key)
    });
    if taken {
        Err(DbError::UniqueViolation(constraint.to_string()))
    } else {
        Ok(())
    }
}

#[async_trait]
impl<T, C, U> CrudRepository<T, C, U> for MemoryRepo<T>
where
    T: MemoryRecord<C, U>,
    C: Sync + 'static,
    U: Sync + 'static,
{
    async fn create(&self, input: &C) -> Result<T, DbError> {
        let row = T::from_create(Uuid::new_v4(), Utc::now(), input);
        let mut tables = self.tables.write().await;
        check_unique::<T, C, U>(T::table(&tables), &row)?;
        row.check_references(&tables)?;
        T::table_mut(&mut tables).insert(row.id(), row.clone());
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<T>, DbError> {
        Ok(T::table(&*self.tables.read().await).values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<T>, DbError> {
        Ok(T::table(&*self.tables.read().await).get(&id).cloned())
    }

    async fn update(&self, id: DbId, input: &U) -> Result<Option<T>, DbError> {
        let mut tables = self.tables.write().await;
        let Some(existing) = T::table(&tables).get(&id) else {
            return Ok(None);
        };
        let mut patched = existing.clone();
        patched.apply_update(input, Utc::now());
        check_unique::<T, C, U>(T::table(&tables), &patched)?;
        patched.check_references(&tables)?;
        T::table_mut(&mut tables).insert(id, patched.clone());
        Ok(Some(patched))
    }

    async fn delete(&self, id: DbId) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        if !T::table(&tables).contains_key(&id) {
            return Ok(false);
        }
        T::on_delete(id, &mut tables)?;
        Ok(T::table_mut(&mut tables).remove(&id).is_some())
    }
}

// ---------------------------------------------------------------------------
// Entity records
// ---------------------------------------------------------------------------

impl MemoryRecord<CreateUser, UpdateUser> for User {
    fn id(&self) -> DbId {
        self.id
    }

    fn table(tables: &MemoryTables) -> &BTreeMap<DbId, Self> {
        &tables.users
    }

    fn table_mut(tables: &mut MemoryTables) -> &mut BTreeMap<DbId, Self> {
        &mut tables.users
    }

    fn from_create(id: DbId, now: Timestamp, input: &CreateUser) -> Self {
        User {
            id,
            email: input.email.clone(),
            name: input.name.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: &UpdateUser, now: Timestamp) {
        if let Some(email) = &input.email {
            self.email = email.clone();
        }
        if let Some(name) = &input.name {
            self.name = name.clone();
        }
        self.updated_at = now;
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("uq_users_email", self.email.clone()))
    }

    fn on_delete(id: DbId, tables: &mut MemoryTables) -> Result<(), DbError> {
        tables.credentials.remove(&id);
        tables.sessions.retain(|_, s| s.user_id != id);
        for project in tables.projects.values_mut() {
            if project.user_id == Some(id) {
                project.user_id = None;
            }
        }

        let images: Vec<DbId> = tables
            .input_images
            .values()
            .filter(|image| image.user_id == id)
            .map(|image| image.id)
            .collect();
        for image_id in &images {
            tables.input_images.remove(image_id);
        }
        tables.cascade_render_configs(|rc| images.contains(&rc.input_image_id));
        Ok(())
    }
}

impl MemoryRecord<CreateImageType, UpdateImageType> for ImageType {
    fn id(&self) -> DbId {
        self.id
    }

    fn table(tables: &MemoryTables) -> &BTreeMap<DbId, Self> {
        &tables.image_types
    }

    fn table_mut(tables: &mut MemoryTables) -> &mut BTreeMap<DbId, Self> {
        &mut tables.image_types
    }

    fn from_create(id: DbId, now: Timestamp, input: &CreateImageType) -> Self {
        ImageType {
            id,
            label: input.label.clone(),
            value: input.value.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: &UpdateImageType, now: Timestamp) {
        if let Some(label) = &input.label {
            self.label = label.clone();
        }
        if let Some(value) = &input.value {
            self.value = value.clone();
        }
        if let Some(description) = &input.description {
            self.description = description.clone();
        }
        self.updated_at = now;
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("uq_image_types_value", self.value.clone()))
    }

    fn on_delete(id: DbId, tables: &mut MemoryTables) -> Result<(), DbError> {
        let referenced = tables
            .render_configs
            .values()
            .any(|rc| rc.image_type_id == id);
        require_reference(!referenced, "render_configs_image_type_id_fkey")
    }
}

impl MemoryRecord<CreateProject, UpdateProject> for Project {
    fn id(&self) -> DbId {
        self.id
    }

    fn table(tables: &MemoryTables) -> &BTreeMap<DbId, Self> {
        &tables.projects
    }

    fn table_mut(tables: &mut MemoryTables) -> &mut BTreeMap<DbId, Self> {
        &mut tables.projects
    }

    fn from_create(id: DbId, now: Timestamp, input: &CreateProject) -> Self {
        Project {
            id,
            name: input.name.clone(),
            user_id: input.user_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: &UpdateProject, now: Timestamp) {
        if let Some(name) = &input.name {
            self.name = name.clone();
        }
        self.updated_at = now;
    }

    fn check_references(&self, tables: &MemoryTables) -> Result<(), DbError> {
        match self.user_id {
            Some(user_id) => require_reference(
                tables.users.contains_key(&user_id),
                "projects_user_id_fkey",
            ),
            None => Ok(()),
        }
    }

    fn on_delete(id: DbId, tables: &mut MemoryTables) -> Result<(), DbError> {
        tables.cascade_render_configs(|rc| rc.project_id == id);
        Ok(())
    }
}

impl MemoryRecord<CreateRenderConfig, UpdateRenderConfig> for RenderConfig {
    fn id(&self) -> DbId {
        self.id
    }

    fn table(tables: &MemoryTables) -> &BTreeMap<DbId, Self> {
        &tables.render_configs
    }

    fn table_mut(tables: &mut MemoryTables) -> &mut BTreeMap<DbId, Self> {
        &mut tables.render_configs
    }

    fn from_create(id: DbId, now: Timestamp, input: &CreateRenderConfig) -> Self {
        RenderConfig {
            id,
            project_id: input.project_id,
            input_image_id: input.input_image_id,
            image_type_id: input.image_type_id,
            style_id: input.style_id,
            colors: input.colors.clone(),
            perspective: input.perspective.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: &UpdateRenderConfig, now: Timestamp) {
        if let Some(project_id) = input.project_id {
            self.project_id = project_id;
        }
        if let Some(input_image_id) = input.input_image_id {
            self.input_image_id = input_image_id;
        }
        if let Some(image_type_id) = input.image_type_id {
            self.image_type_id = image_type_id;
        }
        if let Some(style_id) = input.style_id {
            self.style_id = style_id;
        }
        if let Some(colors) = &input.colors {
            self.colors = colors.clone();
        }
        if let Some(perspective) = &input.perspective {
            self.perspective = perspective.clone();
        }
        self.updated_at = now;
    }

    fn check_references(&self, tables: &MemoryTables) -> Result<(), DbError> {
        require_reference(
            tables.projects.contains_key(&self.project_id),
            "render_configs_project_id_fkey",
        )?;
        require_reference(
            tables.input_images.contains_key(&self.input_image_id),
            "render_configs_input_image_id_fkey",
        )?;
        require_reference(
            tables.image_types.contains_key(&self.image_type_id),
            "render_configs_image_type_id_fkey",
        )?;
        match self.style_id {
            Some(style_id) => require_reference(
                tables.styles.contains_key(&style_id),
                "render_configs_style_id_fkey",
            ),
            None => Ok(()),
        }
    }

    fn on_delete(id: DbId, tables: &mut MemoryTables) -> Result<(), DbError> {
        tables.generations.retain(|_, g| g.render_config_id != id);
        Ok(())
    }
}

impl MemoryRecord<CreateInputImage, UpdateInputImage> for InputImage {
    fn id(&self) -> DbId {
        self.id
    }

    fn table(tables: &MemoryTables) -> &BTreeMap<DbId, Self> {
        &tables.input_images
    }

    fn table_mut(tables: &mut MemoryTables) -> &mut BTreeMap<DbId, Self> {
        &mut tables.input_images
    }

    fn from_create(id: DbId, now: Timestamp, input: &CreateInputImage) -> Self {
        InputImage {
            id,
            url: input.url.clone(),
            user_id: input.user_id,
            created_at: now,
        }
    }

    fn apply_update(&mut self, input: &UpdateInputImage, _now: Timestamp) {
        if let Some(url) = &input.url {
            self.url = url.clone();
        }
    }

    fn check_references(&self, tables: &MemoryTables) -> Result<(), DbError> {
        require_reference(
            tables.users.contains_key(&self.user_id),
            "input_images_user_id_fkey",
        )
    }

    fn on_delete(id: DbId, tables: &mut MemoryTables) -> Result<(), DbError> {
        tables.cascade_render_configs(|rc| rc.input_image_id == id);
        Ok(())
    }
}

impl MemoryRecord<CreateStyle, UpdateStyle> for Style {
    fn id(&self) -> DbId {
        self.id
    }

    fn table(tables: &MemoryTables) -> &BTreeMap<DbId, Self> {
        &tables.styles
    }

    fn table_mut(tables: &mut MemoryTables) -> &mut BTreeMap<DbId, Self> {
        &mut tables.styles
    }

    fn from_create(id: DbId, now: Timestamp, input: &CreateStyle) -> Self {
        Style {
            id,
            name: input.name.clone(),
            thumbnail_url: input.thumbnail_url.clone(),
            prompt_fragment: input.prompt_fragment.clone(),
            image_type_ids: input.image_type_ids.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: &UpdateStyle, now: Timestamp) {
        if let Some(name) = &input.name {
            self.name = name.clone();
        }
        if let Some(url) = &input.thumbnail_url {
            self.thumbnail_url = url.clone();
        }
        if let Some(fragment) = &input.prompt_fragment {
            self.prompt_fragment = fragment.clone();
        }
        if let Some(ids) = &input.image_type_ids {
            self.image_type_ids = ids.clone();
        }
        self.updated_at = now;
    }

    fn on_delete(id: DbId, tables: &mut MemoryTables) -> Result<(), DbError> {
        for rc in tables.render_configs.values_mut() {
            if rc.style_id == Some(id) {
                rc.style_id = None;
            }
        }
        Ok(())
    }
}

impl MemoryRecord<CreateGeneration, UpdateGeneration> for Generation {
    fn id(&self) -> DbId {
        self.id
    }

    fn table(tables: &MemoryTables) -> &BTreeMap<DbId, Self> {
        &tables.generations
    }

    fn table_mut(tables: &mut MemoryTables) -> &mut BTreeMap<DbId, Self> {
        &mut tables.generations
    }

    fn from_create(id: DbId, now: Timestamp, input: &CreateGeneration) -> Self {
        Generation {
            id,
            render_config_id: input.render_config_id,
            status: planvision_core::generation::GenerationStatus::Pending,
            output_image_url: None,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: &UpdateGeneration, now: Timestamp) {
        self.status = input.status;
        if input.output_image_url.is_some() {
            self.output_image_url = input.output_image_url.clone();
        }
        if input.error_message.is_some() {
            self.error_message = input.error_message.clone();
        }
        self.updated_at = now;
    }

    fn check_references(&self, tables: &MemoryTables) -> Result<(), DbError> {
        require_reference(
            tables.render_configs.contains_key(&self.render_config_id),
            "generations_render_config_id_fkey",
        )
    }
}

#[async_trait]
impl GenerationRepository for MemoryRepo<Generation> {
    async fn list_by_render_config(
        &self,
        render_config_id: DbId,
    ) -> Result<Vec<Generation>, DbError> {
        let mut rows: Vec<Generation> = self
            .tables
            .read()
            .await
            .generations
            .values()
            .filter(|g| g.render_config_id == render_config_id)
            .cloned()
            .collect();
        rows.sort_by_key(|g| (g.created_at, g.id));
        Ok(rows)
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[async_trait]
impl UserRepository for MemoryRepo<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn set_password_hash(&self, user_id: DbId, password_hash: &str) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        require_reference(
            tables.users.contains_key(&user_id),
            "user_credentials_user_id_fkey",
        )?;
        tables
            .credentials
            .insert(user_id, password_hash.to_string());
        Ok(())
    }

    async fn find_password_hash(&self, user_id: DbId) -> Result<Option<String>, DbError> {
        Ok(self.tables.read().await.credentials.get(&user_id).cloned())
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

pub struct MemorySessionRepo {
    tables: SharedTables,
}

impl MemorySessionRepo {
    pub fn new(tables: SharedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepo {
    async fn create(&self, input: &CreateSession) -> Result<Session, DbError> {
        let mut tables = self.tables.write().await;
        if tables
            .sessions
            .values()
            .any(|s| s.token_hash == input.token_hash)
        {
            return Err(DbError::UniqueViolation(
                "uq_sessions_token_hash".to_string(),
            ));
        }
        require_reference(
            tables.users.contains_key(&input.user_id),
            "sessions_user_id_fkey",
        )?;
        let session = Session {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            token_hash: input.token_hash.clone(),
            expires_at: input.expires_at,
            created_at: Utc::now(),
        };
        tables.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_active_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Session>, DbError> {
        let now = Utc::now();
        Ok(self
            .tables
            .read()
            .await
            .sessions
            .values()
            .find(|s| s.token_hash == token_hash && !s.is_expired(now))
            .cloned())
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        let sessions = &mut tables.sessions;
        let before = sessions.len();
        sessions.retain(|_, s| s.token_hash != token_hash);
        Ok(sessions.len() < before)
    }

    async fn delete_for_user(&self, user_id: DbId) -> Result<u64, DbError> {
        let mut tables = self.tables.write().await;
        let sessions = &mut tables.sessions;
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id != user_id);
        Ok((before - sessions.len()) as u64)
    }

    async fn delete_expired(&self) -> Result<u64, DbError> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        let sessions = &mut tables.sessions;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        Ok((before - sessions.len()) as u64)
    }
}
