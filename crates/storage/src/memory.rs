//! Process-local object store.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::ObjectStore;

/// An object held by [`MemoryObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Keeps objects in a map; signed URLs use the `memory://` scheme.
pub struct MemoryObjectStore {
    bucket: String,
    objects: RwLock<HashMap<String, MemoryObject>>,
}

impl MemoryObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch a stored object.
    pub async fn get(&self, name: &str) -> Option<MemoryObject> {
        self.objects.read().await.get(name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.objects.write().await.insert(
            name.to_string(),
            MemoryObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StorageError> {
        self.objects.write().await.remove(name);
        Ok(())
    }

    async fn presign_get(&self, name: &str, expires_in: Duration) -> Result<String, StorageError> {
        if !self.objects.read().await.contains_key(name) {
            return Err(StorageError::Backend(format!("No such object: {name}")));
        }
        let expires_at = chrono::Utc::now().timestamp() + expires_in.as_secs() as i64;
        Ok(format!(
            "memory://{}/{name}?expires={expires_at}",
            self.bucket
        ))
    }
}
