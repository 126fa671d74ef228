use url::Url;

use crate::error::ClientResult;

/// Scheme of the default API endpoint.
pub const API_SCHEME: &str = "http";

/// Host of the default API endpoint.
pub const API_HOST: &str = "localhost";

/// Port of the default API endpoint.
pub const API_PORT: u16 = 3000;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the client sends its requests.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, always ending in `/`.
    pub base_url: Url,
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Point the client at `base_url`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// `http://localhost:3000/`, unless `PLANVISION_API_URL` is set.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup("PLANVISION_API_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => Self::new(url.trim()),
            None => Self::new(&format!("{API_SCHEME}://{API_HOST}:{API_PORT}")),
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
