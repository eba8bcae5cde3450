//! Session manager with single-flight credential refresh
//!
//! Owns the access credential for one application session and coordinates
//! recovery from credential expiry:
//! - Credential retrieval from the configured store on startup
//! - Single-flight refresh: concurrent callers share one refresh call
//! - Terminal handling of refresh failure (clear credential, publish
//!   session-expired, fail every waiting caller)

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{oneshot, watch, Mutex, RwLock};
use tracing::{debug, info, warn};

use super::traits::{CredentialStore, RefreshTransport};
use super::types::SessionEvent;

/// Error type for session operations
///
/// `Clone` because a single refresh outcome is fanned out to every caller
/// that queued behind the in-flight refresh.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The refresh credential was rejected or the refresh call failed;
    /// the session is over
    #[error("session expired: {0}")]
    Expired(String),

    /// Refresh transport failed before an outcome was known
    #[error("refresh transport error: {0}")]
    Transport(String),

    /// Credential store operation failed
    #[error("credential store error: {0}")]
    Store(String),
}

/// Outcome shared between the refresh leader and its queued waiters
type RefreshOutcome = Result<String, SessionError>;

/// Queue state guarded by one mutex
///
/// `refreshing` and the waiter queue change together: the flag is checked
/// and set under the same lock acquisition, so at most one refresh call is
/// outstanding at any time. Waiters enqueue only while `refreshing` is
/// true and are drained, in enqueue order, before the flag resets.
struct RefreshState {
    refreshing: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

/// Session manager for the authenticated API client
///
/// Manages the credential lifecycle:
/// 1. Holds the current access credential behind an async `RwLock`
/// 2. Mirrors it to a [`CredentialStore`] for persistence
/// 3. Collapses concurrent refresh demand into exactly one
///    [`RefreshTransport::refresh`] call
/// 4. Publishes [`SessionEvent::Expired`] when a refresh fails
pub struct SessionManager {
    transport: Arc<dyn RefreshTransport>,
    store: Arc<dyn CredentialStore>,
    access_token: RwLock<Option<String>>,
    refresh: Mutex<RefreshState>,
    events: watch::Sender<SessionEvent>,
}

impl SessionManager {
    /// Create a new session manager
    ///
    /// # Arguments
    /// * `transport` - Refresh transport (the HTTP refresh endpoint)
    /// * `store` - Credential store for persistence
    #[must_use]
    pub fn new(transport: Arc<dyn RefreshTransport>, store: Arc<dyn CredentialStore>) -> Self {
        let (events, _) = watch::channel(SessionEvent::Active);
        Self {
            transport,
            store,
            access_token: RwLock::new(None),
            refresh: Mutex::new(RefreshState { refreshing: false, waiters: Vec::new() }),
            events,
        }
    }

    /// Initialize by loading a persisted credential from the store
    ///
    /// Should be called on app startup.
    ///
    /// # Returns
    /// `true` if a credential was loaded, `false` if none was stored
    ///
    /// # Errors
    /// Returns error if the store is unreadable (not if it is empty)
    pub async fn initialize(&self) -> Result<bool, SessionError> {
        match self.store.load().await? {
            Some(token) => {
                *self.access_token.write().await = Some(token);
                info!("session initialized with stored credential");
                Ok(true)
            }
            None => {
                debug!("no stored credential found");
                Ok(false)
            }
        }
    }

    /// Store a new access credential (after a successful login)
    ///
    /// # Errors
    /// Returns error if persisting to the store fails
    pub async fn set_access_token(&self, token: String) -> Result<(), SessionError> {
        self.store.save(&token).await?;
        *self.access_token.write().await = Some(token);
        Ok(())
    }

    /// Get the current access credential, if any
    pub async fn access_token(&self) -> Option<String> {
        self.access_token.read().await.clone()
    }

    /// Check whether a credential is present
    pub async fn is_authenticated(&self) -> bool {
        self.access_token.read().await.is_some()
    }

    /// Subscribe to session lifecycle events
    ///
    /// The receiver observes [`SessionEvent::Expired`] exactly once per
    /// failed refresh, regardless of how many requests were queued behind
    /// it. The application shell uses this to navigate to its
    /// unauthenticated entry point.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Obtain a fresh access credential, sharing one in-flight refresh
    ///
    /// If a refresh is already in flight, the caller is queued and resumes
    /// with that refresh's outcome; queued callers are granted permission
    /// to proceed in enqueue order. Otherwise this caller becomes the
    /// leader and issues exactly one refresh call.
    ///
    /// On success the new credential is stored and returned. On failure the
    /// stored credential is cleared, [`SessionEvent::Expired`] is published
    /// once, and every caller (leader and queued) receives
    /// [`SessionError::Expired`]. A failed refresh is never retried here.
    ///
    /// # Errors
    /// Returns [`SessionError::Expired`] if the refresh call fails
    pub async fn refresh_access_token(&self) -> Result<String, SessionError> {
        let waiter = {
            let mut state = self.refresh.lock().await;
            if state.refreshing {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Some(rx)
            } else {
                state.refreshing = true;
                None
            }
        };

        if let Some(rx) = waiter {
            debug!("refresh already in flight, waiting for shared outcome");
            return match rx.await {
                Ok(outcome) => outcome,
                // Leader dropped before draining; nothing more will arrive.
                Err(_) => Err(SessionError::Expired("refresh abandoned".to_string())),
            };
        }

        debug!("issuing credential refresh");
        let outcome = self.run_refresh().await;

        let mut state = self.refresh.lock().await;
        for tx in state.waiters.drain(..) {
            // A waiter that has gone away just leaves a dead channel.
            let _ = tx.send(outcome.clone());
        }
        state.refreshing = false;
        drop(state);

        outcome
    }

    /// Clear the session credential (logout)
    ///
    /// # Errors
    /// Returns error if the store removal fails
    pub async fn clear(&self) -> Result<(), SessionError> {
        self.store.clear().await?;
        *self.access_token.write().await = None;
        info!("session credential cleared");
        Ok(())
    }

    /// Execute the refresh call and apply its side effects
    async fn run_refresh(&self) -> RefreshOutcome {
        match self.transport.refresh().await {
            Ok(token) => {
                *self.access_token.write().await = Some(token.clone());
                if let Err(err) = self.store.save(&token).await {
                    // The in-memory credential is authoritative; persistence
                    // catches up at the next save.
                    warn!(error = %err, "failed to persist refreshed credential");
                }
                info!("credential refreshed");
                Ok(token)
            }
            Err(err) => {
                warn!(error = %err, "credential refresh failed, ending session");
                *self.access_token.write().await = None;
                if let Err(store_err) = self.store.clear().await {
                    warn!(error = %store_err, "failed to clear stored credential");
                }
                self.events.send_replace(SessionEvent::Expired);
                Err(SessionError::Expired(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for auth::session.
    use super::*;
    use crate::auth::MemoryCredentialStore;
    use crate::testing::MockRefreshTransport;

    fn manager_with(transport: MockRefreshTransport) -> SessionManager {
        SessionManager::new(Arc::new(transport), Arc::new(MemoryCredentialStore::new()))
    }

    /// Validates the session manager creation scenario.
    ///
    /// Assertions:
    /// - Ensures `!manager.is_authenticated().await` evaluates to true.
    #[tokio::test]
    async fn test_session_manager_creation() {
        let manager = manager_with(MockRefreshTransport::succeeding("unused"));
        assert!(!manager.is_authenticated().await);
        assert!(manager.access_token().await.is_none());
    }

    /// Validates the store and retrieve credential scenario.
    ///
    /// Assertions:
    /// - Ensures `manager.is_authenticated().await` evaluates to true.
    /// - Confirms the retrieved credential equals the stored one.
    #[tokio::test]
    async fn test_set_and_get_access_token() {
        let manager = manager_with(MockRefreshTransport::succeeding("unused"));

        manager.set_access_token("access-1".to_string()).await.unwrap();

        assert!(manager.is_authenticated().await);
        assert_eq!(manager.access_token().await.as_deref(), Some("access-1"));
    }

    /// Validates the initialize-from-store scenario.
    ///
    /// Assertions:
    /// - Ensures `initialize` reports a loaded credential.
    /// - Confirms the credential is available in memory afterwards.
    #[tokio::test]
    async fn test_initialize_loads_persisted_credential() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.save("persisted").await.unwrap();

        let manager = SessionManager::new(
            Arc::new(MockRefreshTransport::succeeding("unused")),
            store,
        );

        assert!(manager.initialize().await.unwrap());
        assert_eq!(manager.access_token().await.as_deref(), Some("persisted"));
    }

    /// Validates the initialize-with-empty-store scenario.
    #[tokio::test]
    async fn test_initialize_with_empty_store() {
        let manager = manager_with(MockRefreshTransport::succeeding("unused"));
        assert!(!manager.initialize().await.unwrap());
        assert!(!manager.is_authenticated().await);
    }

    /// Validates the clear credential scenario.
    #[tokio::test]
    async fn test_clear_removes_credential() {
        let manager = manager_with(MockRefreshTransport::succeeding("unused"));
        manager.set_access_token("access-1".to_string()).await.unwrap();

        manager.clear().await.unwrap();

        assert!(!manager.is_authenticated().await);
    }

    /// Validates the successful refresh scenario.
    ///
    /// Assertions:
    /// - Confirms the refreshed credential is returned and stored.
    /// - Confirms no session event is published on success.
    #[tokio::test]
    async fn test_refresh_success_stores_credential() {
        let manager = manager_with(MockRefreshTransport::succeeding("access-2"));
        manager.set_access_token("access-1".to_string()).await.unwrap();
        let mut events = manager.subscribe();

        let token = manager.refresh_access_token().await.unwrap();

        assert_eq!(token, "access-2");
        assert_eq!(manager.access_token().await.as_deref(), Some("access-2"));
        assert!(!events.has_changed().unwrap());
    }

    /// Validates the failed refresh scenario.
    ///
    /// Assertions:
    /// - Confirms the caller receives `SessionError::Expired`.
    /// - Confirms the stored credential is cleared.
    /// - Confirms `SessionEvent::Expired` is published.
    #[tokio::test]
    async fn test_refresh_failure_is_terminal() {
        let manager = manager_with(MockRefreshTransport::failing("invalid refresh credential"));
        manager.set_access_token("access-1".to_string()).await.unwrap();
        let mut events = manager.subscribe();

        let result = manager.refresh_access_token().await;

        assert!(matches!(result, Err(SessionError::Expired(_))));
        assert!(!manager.is_authenticated().await);
        assert!(events.has_changed().unwrap());
        assert_eq!(*events.borrow_and_update(), SessionEvent::Expired);
    }

    /// Validates that a refresh after failure starts a fresh single-flight
    /// round rather than reusing the settled one.
    #[tokio::test]
    async fn test_refresh_rounds_are_independent() {
        let transport = MockRefreshTransport::failing("nope");
        let manager = manager_with(transport.clone());

        assert!(manager.refresh_access_token().await.is_err());
        assert!(manager.refresh_access_token().await.is_err());

        assert_eq!(transport.calls(), 2);
    }
}
