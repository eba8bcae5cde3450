//! Session core: credential lifetime and refresh coordination
//!
//! The backend issues a short-lived bearer credential at login and rotates
//! it through `POST /auth/refresh` (refresh credential travels in an
//! HTTP-managed cookie owned by the transport layer). This module owns the
//! client side of that lifecycle:
//!
//! - **[`SessionManager`]**: holds the current access credential and
//!   coordinates refresh so that any number of concurrent callers share
//!   exactly one in-flight refresh call (single-flight)
//! - **[`CredentialStore`]**: pluggable persistence for the access
//!   credential (in-memory, JSON file)
//! - **[`RefreshTransport`]**: the seam to the HTTP layer that actually
//!   performs the refresh call
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  SessionManager  │  Credential lifetime + single-flight refresh
//! └────────┬─────────┘
//!          │
//!          ├──► RefreshTransport   (HTTP refresh call, client crate)
//!          └──► CredentialStore    (persistent credential storage)
//! ```
//!
//! A refresh failure is terminal for the session: the credential is
//! cleared and a [`SessionEvent::Expired`] is published once on the watch
//! channel returned by [`SessionManager::subscribe`]; the application
//! shell reacts by navigating to its unauthenticated entry point.

pub mod session;
pub mod store;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use session::{SessionError, SessionManager};
pub use store::{FileCredentialStore, MemoryCredentialStore};
pub use traits::{CredentialStore, RefreshTransport};
pub use types::{SessionEvent, TokenResponse};
