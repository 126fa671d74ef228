use crate::error::StorageError;

/// Default public host for GCS objects (and its S3-compatible endpoint).
pub const GCS_HOST: &str = "https://storage.googleapis.com";

/// Default maximum accepted upload size (20 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Which [`ObjectStore`](crate::ObjectStore) implementation to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// GCS through the interoperability endpoint, authenticated with HMAC keys.
    Gcs {
        endpoint: String,
        access_key: String,
        secret: String,
    },
    /// Process-local storage; nothing is persisted.
    Memory,
}

/// Storage configuration resolved once at startup.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub project_id: String,
    /// Custom domain serving the bucket, e.g. `images.planvision.app`.
    pub public_domain: Option<String>,
    pub max_upload_bytes: usize,
    pub backend: StorageBackend,
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Required          | Default                          |
    /// |------------------------|-------------------|----------------------------------|
    /// | `GCS_BUCKET`           | **yes**           | --                               |
    /// | `GCP_PROJECT_ID`       | **yes**           | --                               |
    /// | `GCS_PUBLIC_DOMAIN`    | no                | --                               |
    /// | `STORAGE_BACKEND`      | no                | `gcs`                            |
    /// | `GCS_ENDPOINT`         | no                | `https://storage.googleapis.com` |
    /// | `GCS_HMAC_ACCESS_KEY`  | for `gcs` backend | --                               |
    /// | `GCS_HMAC_SECRET`      | for `gcs` backend | --                               |
    /// | `MAX_UPLOAD_BYTES`     | no                | `20971520`                       |
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StorageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(StorageError::MissingConfig(key));

        let bucket = require("GCS_BUCKET")?;
        let project_id = require("GCP_PROJECT_ID")?;
        let public_domain = get("GCS_PUBLIC_DOMAIN");

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.parse().map_err(|_| {
                StorageError::InvalidConfig(format!("MAX_UPLOAD_BYTES must be a number, got '{raw}'"))
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let backend = match get("STORAGE_BACKEND").as_deref().unwrap_or("gcs") {
            "gcs" => StorageBackend::Gcs {
                endpoint: get("GCS_ENDPOINT").unwrap_or_else(|| GCS_HOST.to_string()),
                access_key: require("GCS_HMAC_ACCESS_KEY")?,
                secret: require("GCS_HMAC_SECRET")?,
            },
            "memory" => StorageBackend::Memory,
            other => {
                return Err(StorageError::InvalidConfig(format!(
                    "Unknown STORAGE_BACKEND '{other}'. Must be one of: gcs, memory"
                )))
            }
        };

        Ok(Self {
            bucket,
            project_id,
            public_domain,
            max_upload_bytes,
            backend,
        })
    }

    /// Prefix every public object URL starts with, always ending in `/`.
    pub fn public_url_prefix(&self) -> String {
        match &self.public_domain {
            Some(domain) => {
                let domain = domain.trim_end_matches('/');
                if domain.starts_with("http://") || domain.starts_with("https://") {
                    format!("{domain}/")
                } else {
                    format!("https://{domain}/")
                }
            }
            None => format!("{GCS_HOST}/{}/", self.bucket),
        }
    }
}
