//! Session token storage.
//!
//! Stores the backend bearer token in `<conecta home>/auth.json` with
//! restricted permissions (0600). Tokens are never logged in full.
//!
//! The store is deliberately infallible at its surface: a broken storage
//! medium degrades to "no session" with a logged warning, it never fails the
//! request that consulted it.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::paths;

/// Read/write access to the persisted session token.
///
/// Injected into the API client so it can be faked in tests and swapped for
/// other persistence mediums.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, if any.
    fn get(&self) -> Option<String>;

    /// Persists `token`, replacing any previous value.
    fn set(&self, token: &str);

    /// Removes the stored token; no-op when nothing is stored.
    fn clear(&self);
}

/// On-disk shape of the session file.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// Token store backed by a JSON file.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store at an explicit path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default location, `<conecta home>/auth.json`.
    pub fn open_default() -> Self {
        Self::new(paths::auth_path())
    }

    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;
        let stored: StoredSession = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;

        Ok(Some(stored.token))
    }

    /// Writes the session file with restricted permissions (0600), via a
    /// temp file + rename so a crash cannot leave a half-written session.
    fn persist(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(&StoredSession {
            token: token.to_string(),
        })
        .context("Failed to serialize session")?;

        let tmp_path = self.path.with_extension("json.tmp");

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&tmp_path)
                .with_context(|| format!("Failed to open {} for writing", tmp_path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", tmp_path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&tmp_path, contents)
                .with_context(|| format!("Failed to write to {}", tmp_path.display()))?;
        }

        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to remove session file {}", self.path.display())
            }),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        match self.read() {
            Ok(token) => token,
            Err(e) => {
                warn!("session read failed, continuing without token: {e:#}");
                None
            }
        }
    }

    fn set(&self, token: &str) {
        if let Err(e) = self.persist(token) {
            warn!("session write failed, token not persisted: {e:#}");
        }
    }

    fn clear(&self) {
        if let Err(e) = self.remove() {
            warn!("session removal failed: {e:#}");
        }
    }
}

/// In-process token store for tests and embedders.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with a token.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: &str) {
        *self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(token.to_string());
    }

    fn clear(&self) {
        *self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
    }
}

/// Masks a token for log output. The token is an opaque server-supplied
/// string, so the prefix is taken by characters, not bytes.
pub fn mask_token(token: &str) -> String {
    if token.chars().count() <= 16 {
        return "***".to_string();
    }
    let prefix: String = token.chars().take(12).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("auth.json"));

        assert_eq!(store.get(), None);

        store.set("tok_123");
        assert_eq!(store.get(), Some("tok_123".to_string()));

        store.clear();
        assert_eq!(store.get(), None);
    }

    /// A second store over the same path sees the persisted token.
    #[test]
    fn test_file_store_survives_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("auth.json");

        FileTokenStore::new(path.clone()).set("tok_persisted");

        let reopened = FileTokenStore::new(path);
        assert_eq!(reopened.get(), Some("tok_persisted".to_string()));
    }

    #[test]
    fn test_file_store_set_replaces_previous_token() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("auth.json"));

        store.set("tok_old");
        store.set("tok_new");
        assert_eq!(store.get(), Some("tok_new".to_string()));
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("auth.json"));

        store.clear();
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_store_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("auth.json"));

        store.set("tok_nested");
        assert_eq!(store.get(), Some("tok_nested".to_string()));
    }

    /// A corrupt session file degrades to "no session" instead of failing.
    #[test]
    fn test_file_store_corrupt_file_reads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("auth.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileTokenStore::new(path);
        assert_eq!(store.get(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("auth.json");
        FileTokenStore::new(path.clone()).set("tok_secret");

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(), None);

        store.set("tok_mem");
        assert_eq!(store.get(), Some("tok_mem".to_string()));

        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_mask_token_short_and_long() {
        assert_eq!(mask_token("short"), "***");
        assert_eq!(
            mask_token("a-rather-long-session-token"),
            "a-rather-lon..."
        );
    }

    /// The token is opaque; masking must not assume ASCII.
    #[test]
    fn test_mask_token_multibyte_token() {
        assert_eq!(mask_token("sessão-áéíóú-comprida-123"), "sessão-áéíóú...");
        assert_eq!(mask_token("sessão-curta"), "***");
    }
}
