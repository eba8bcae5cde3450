//! Test doubles for the session seams
//!
//! Deterministic implementations of [`crate::auth::RefreshTransport`] for
//! unit and integration tests. For a credential store double, use
//! [`crate::auth::MemoryCredentialStore`] directly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::auth::{RefreshTransport, SessionError};

/// Scripted refresh transport
///
/// Returns a fixed outcome and counts calls. An optional gate holds each
/// refresh call in flight until the test releases it, which is how the
/// single-flight tests pile waiters up behind one refresh.
#[derive(Clone)]
pub struct MockRefreshTransport {
    inner: Arc<Inner>,
}

struct Inner {
    outcome: Result<String, SessionError>,
    calls: AtomicUsize,
    gate: Option<Semaphore>,
}

impl MockRefreshTransport {
    /// Transport whose refresh always succeeds with `token`
    #[must_use]
    pub fn succeeding(token: &str) -> Self {
        Self::with_outcome(Ok(token.to_string()), false)
    }

    /// Transport whose refresh always fails with `reason`
    #[must_use]
    pub fn failing(reason: &str) -> Self {
        Self::with_outcome(Err(SessionError::Transport(reason.to_string())), false)
    }

    /// Gated variant of [`Self::succeeding`]: refresh calls block until
    /// [`Self::release`] grants them passage
    #[must_use]
    pub fn succeeding_gated(token: &str) -> Self {
        Self::with_outcome(Ok(token.to_string()), true)
    }

    /// Gated variant of [`Self::failing`]
    #[must_use]
    pub fn failing_gated(reason: &str) -> Self {
        Self::with_outcome(Err(SessionError::Transport(reason.to_string())), true)
    }

    fn with_outcome(outcome: Result<String, SessionError>, gated: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                outcome,
                calls: AtomicUsize::new(0),
                gate: gated.then(|| Semaphore::new(0)),
            }),
        }
    }

    /// Number of refresh calls issued so far (including ones still gated)
    #[must_use]
    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// Let `n` gated refresh calls proceed
    ///
    /// No-op for ungated transports.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.inner.gate {
            gate.add_permits(n);
        }
    }
}

#[async_trait]
impl RefreshTransport for MockRefreshTransport {
    async fn refresh(&self) -> Result<String, SessionError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.inner.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|_| SessionError::Transport("mock gate closed".to_string()))?;
            permit.forget();
        }

        self.inner.outcome.clone()
    }
}
