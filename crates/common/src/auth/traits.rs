//! Traits for refresh transport and credential storage
//!
//! These traits enable dependency injection and testing by abstracting
//! external dependencies (the HTTP refresh endpoint, persistent storage).

use async_trait::async_trait;

use super::session::SessionError;

/// Trait for performing the credential refresh call
///
/// Implemented against `POST /auth/refresh` by the client crate; the
/// refresh credential travels in an HTTP-managed cookie, so the
/// implementation takes no token argument.
#[async_trait]
pub trait RefreshTransport: Send + Sync {
    /// Obtain a new access credential from the backend
    ///
    /// # Returns
    /// The new access credential string
    ///
    /// # Errors
    /// Returns error if the call fails for any reason (network, rejected
    /// refresh credential, malformed response). The session manager treats
    /// every failure as terminal.
    async fn refresh(&self) -> Result<String, SessionError>;
}

/// Trait for persistent access-credential storage
///
/// The Rust analogue of the original client's persistent credential
/// storage. Implementations must tolerate concurrent access from multiple
/// tasks.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the persisted access credential, if any
    ///
    /// # Errors
    /// Returns error if the backing store is unreadable (a missing
    /// credential is `Ok(None)`, not an error)
    async fn load(&self) -> Result<Option<String>, SessionError>;

    /// Persist the access credential, replacing any previous value
    ///
    /// # Errors
    /// Returns error if the write fails
    async fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the persisted access credential
    ///
    /// Clearing an already-empty store is not an error.
    ///
    /// # Errors
    /// Returns error if the removal fails
    async fn clear(&self) -> Result<(), SessionError>;
}
