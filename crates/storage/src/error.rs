#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A required environment variable is absent or empty.
    #[error("Missing storage configuration: {0}")]
    MissingConfig(&'static str),

    /// A configuration value is present but unusable.
    #[error("Invalid storage configuration: {0}")]
    InvalidConfig(String),

    /// The upload was rejected before reaching the backend.
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// A signed URL was requested with a lifetime outside `1..=max` seconds.
    #[error("Signed URL TTL must be between 1 and {max_secs} seconds, got {requested_secs}")]
    InvalidTtl { requested_secs: u64, max_secs: u64 },

    /// The backend returned an error.
    #[error("Storage backend error: {0}")]
    Backend(String),
}
