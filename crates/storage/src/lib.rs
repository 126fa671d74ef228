//! Object storage for uploaded images.
//!
//! [`StorageService`] owns the bucket name and public URL prefix resolved at
//! startup and delegates byte transfer to an [`ObjectStore`] backend:
//! - [`gcs::GcsInteropStore`] -- Google Cloud Storage via its S3-compatible
//!   XML API (HMAC keys).
//! - [`memory::MemoryObjectStore`] -- process-local, for tests and demos.

pub mod config;
pub mod error;
pub mod gcs;
pub mod memory;
pub mod service;

use std::time::Duration;

use async_trait::async_trait;

pub use config::{StorageBackend, StorageConfig};
pub use error::StorageError;
pub use service::{StorageService, StoredObject, UploadedFile};

/// Byte-level operations every storage backend provides.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `bytes` under `name`, replacing any existing object.
    async fn put(&self, name: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<(), StorageError>;

    /// Remove `name`. Deleting a missing object is not an error.
    async fn delete(&self, name: &str) -> Result<(), StorageError>;

    /// A time-limited URL granting read access to `name`.
    async fn presign_get(&self, name: &str, expires_in: Duration) -> Result<String, StorageError>;
}
