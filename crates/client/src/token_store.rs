//! Persistent storage for the bearer token.
//!
//! A single entry keyed by [`SERVICE`] and [`ACCOUNT`]. Every failure is
//! swallowed: reads return `None`, writes and deletes become no-ops, and the
//! cause is logged at `warn`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Service half of the entry key.
pub const SERVICE: &str = "com.planvision.app";

/// Account half of the entry key.
pub const ACCOUNT: &str = "auth_token";

/// Storage for the one bearer token the app holds.
pub trait TokenStore: Send + Sync {
    fn get_token(&self) -> Option<String>;

    /// Replace the stored token. An empty token is ignored.
    fn save(&self, token: &str);

    fn delete(&self);
}

/// On-disk entry layout.
#[derive(Debug, Serialize, Deserialize)]
struct TokenEntry {
    service: String,
    account: String,
    token: String,
}

/// Token kept as a JSON file readable only by the current user.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store the entry under `dir`, which is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let path = dir.into().join(format!("{SERVICE}.{ACCOUNT}.json"));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_entry(&self, entry: &TokenEntry) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(entry)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        file.write_all(&json)
    }
}

impl TokenStore for FileTokenStore {
    fn get_token(&self) -> Option<String> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Token read failed");
                return None;
            }
        };
        match serde_json::from_slice::<TokenEntry>(&bytes) {
            Ok(entry) if entry.service == SERVICE && entry.account == ACCOUNT => {
                Some(entry.token).filter(|t| !t.is_empty())
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Token entry is corrupt");
                None
            }
        }
    }

    fn save(&self, token: &str) {
        if token.is_empty() {
            return;
        }
        let entry = TokenEntry {
            service: SERVICE.to_string(),
            account: ACCOUNT.to_string(),
            token: token.to_string(),
        };
        if let Err(e) = self.write_entry(&entry) {
            tracing::warn!(path = %self.path.display(), error = %e, "Token save failed");
        }
    }

    fn delete(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Token delete failed");
            }
        }
    }
}

/// Process-local store for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.save(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_token(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn save(&self, token: &str) {
        if token.is_empty() {
            return;
        }
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn delete(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get_token(), None);

        store.save("abc");
        assert_eq!(store.get_token().as_deref(), Some("abc"));

        store.delete();
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn empty_token_does_not_overwrite() {
        let store = MemoryTokenStore::with_token("abc");
        store.save("");
        assert_eq!(store.get_token().as_deref(), Some("abc"));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("credentials"));
        assert_eq!(store.get_token(), None);

        store.save("abc");
        assert_eq!(store.get_token().as_deref(), Some("abc"));

        store.save("def");
        assert_eq!(store.get_token().as_deref(), Some("def"));

        store.delete();
        assert_eq!(store.get_token(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn file_store_delete_without_entry_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());
        store.delete();
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn corrupt_entry_reads_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());
        fs::write(store.path(), b"{not json").unwrap();
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn unwritable_location_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file, not a directory").unwrap();

        let store = FileTokenStore::new(blocker.join("nested"));
        store.save("abc");
        assert_eq!(store.get_token(), None);
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private_to_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());
        store.save("abc");
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
