//! Credential store implementations
//!
//! Two backends for the [`CredentialStore`] trait:
//! - [`MemoryCredentialStore`]: process-lifetime storage, also the default
//!   test double
//! - [`FileCredentialStore`]: a small JSON file, the desktop analogue of
//!   the original client's persistent storage

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::session::SessionError;
use super::traits::CredentialStore;

/// In-memory credential store
///
/// Credential lives for the process lifetime only.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.token.read().await.clone())
    }

    async fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.token.write().await = None;
        Ok(())
    }
}

/// On-disk representation of the persisted credential
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCredential {
    access_token: String,
}

/// JSON-file credential store
///
/// Persists the access credential across restarts. The file holds only the
/// short-lived access credential; the refresh credential never reaches
/// application storage (cookie transport).
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store backed by the given file path
    ///
    /// The file is created on first save; a missing file reads as no
    /// credential.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<String>, SessionError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(SessionError::Store(format!(
                    "failed to read {}: {err}",
                    self.path.display()
                )))
            }
        };

        let stored: StoredCredential = serde_json::from_str(&contents).map_err(|err| {
            SessionError::Store(format!("invalid credential file {}: {err}", self.path.display()))
        })?;

        Ok(Some(stored.access_token))
    }

    async fn save(&self, token: &str) -> Result<(), SessionError> {
        let stored = StoredCredential { access_token: token.to_string() };
        let contents = serde_json::to_string(&stored)
            .map_err(|err| SessionError::Store(format!("failed to encode credential: {err}")))?;

        tokio::fs::write(&self.path, contents).await.map_err(|err| {
            SessionError::Store(format!("failed to write {}: {err}", self.path.display()))
        })
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionError::Store(format!(
                "failed to remove {}: {err}",
                self.path.display()
            ))),
        }
    }
}
