use std::sync::Arc;
use std::time::Duration;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::StorageError;
use crate::gcs::GcsInteropStore;
use crate::memory::MemoryObjectStore;
use crate::ObjectStore;

/// Longest allowed signed URL lifetime (GCS V4 signing limit: 7 days).
pub const MAX_SIGNED_URL_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object name inside the bucket, e.g. `input-images/<uuid>-plan.png`.
    pub name: String,
    /// Public URL of the object.
    pub url: String,
}

/// A file received from a multipart form field.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Bucket-scoped upload, delete and URL-signing operations.
#[derive(Clone)]
pub struct StorageService {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    public_url_prefix: String,
    max_upload_bytes: usize,
}

impl StorageService {
    /// Build the backend named by `config`.
    pub fn from_config(config: &StorageConfig) -> Self {
        let store: Arc<dyn ObjectStore> = match &config.backend {
            StorageBackend::Gcs {
                endpoint,
                access_key,
                secret,
            } => Arc::new(GcsInteropStore::new(
                endpoint,
                access_key,
                secret,
                &config.bucket,
            )),
            StorageBackend::Memory => Arc::new(MemoryObjectStore::new(config.bucket.clone())),
        };
        Self::with_store(store, config)
    }

    /// Use an already-built backend.
    pub fn with_store(store: Arc<dyn ObjectStore>, config: &StorageConfig) -> Self {
        Self {
            store,
            bucket: config.bucket.clone(),
            public_url_prefix: config.public_url_prefix(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Store `bytes` as `"{folder}/{uuid}-{file_name}"` and return its public URL.
    pub async fn upload_buffer(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        file_name: &str,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let name = format!(
            "{}/{}-{}",
            folder.trim_matches('/'),
            uuid::Uuid::new_v4(),
            sanitize_file_name(file_name)
        );
        let size = bytes.len();

        self.store.put(&name, bytes, content_type).await?;

        tracing::info!(object_name = %name, size, content_type, "Object uploaded");
        Ok(StoredObject {
            url: self.public_url(&name),
            name,
        })
    }

    /// Validate a multipart upload and store it under `folder`.
    pub async fn upload_file(
        &self,
        file: UploadedFile,
        folder: &str,
    ) -> Result<StoredObject, StorageError> {
        let UploadedFile {
            file_name,
            content_type,
            bytes,
        } = file;

        if bytes.is_empty() {
            return Err(StorageError::InvalidUpload("Empty file".into()));
        }
        if bytes.len() > self.max_upload_bytes {
            return Err(StorageError::InvalidUpload(format!(
                "File too large: {} bytes (max {})",
                bytes.len(),
                self.max_upload_bytes
            )));
        }
        let content_type = if content_type.is_empty() {
            "application/octet-stream"
        } else {
            content_type.as_str()
        };
        self.upload_buffer(bytes, folder, &file_name, content_type)
            .await
    }

    /// Time-limited read URL for `object_name`.
    pub async fn signed_url(
        &self,
        object_name: &str,
        ttl: Duration,
    ) -> Result<String, StorageError> {
        if ttl.is_zero() || ttl > MAX_SIGNED_URL_TTL {
            return Err(StorageError::InvalidTtl {
                requested_secs: ttl.as_secs(),
                max_secs: MAX_SIGNED_URL_TTL.as_secs(),
            });
        }
        self.store.presign_get(object_name, ttl).await
    }

    pub fn public_url(&self, object_name: &str) -> String {
        format!("{}{object_name}", self.public_url_prefix)
    }

    /// Inverse of [`public_url`](Self::public_url). URLs outside the bucket yield `None`.
    pub fn object_name_from_url(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(&self.public_url_prefix)?;
        let name = rest.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }

    pub async fn delete(&self, object_name: &str) -> Result<(), StorageError> {
        self.store.delete(object_name).await?;
        tracing::info!(object_name, "Object deleted");
        Ok(())
    }
}

/// Keep ASCII alphanumerics plus `.`, `-` and `_`; everything else becomes `_`.
fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}
