use std::sync::Arc;

use planvision_db::Repositories;
use planvision_storage::StorageService;

use crate::auth::resolver::SessionResolver;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Repositories for every entity, Postgres or in-memory.
    pub repos: Repositories,
    /// Resolves the request session from its headers.
    pub sessions: Arc<dyn SessionResolver>,
    /// Uploads and signed URLs for input images.
    pub storage: Arc<StorageService>,
}
