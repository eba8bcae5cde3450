//! Session types
//!
//! Wire and event types shared between the session core and the HTTP layer.

use serde::{Deserialize, Serialize};

/// Token response from the auth endpoints
///
/// Both `POST /auth/login` and `POST /auth/refresh` answer with this body;
/// the refresh credential itself never appears here (cookie transport).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Short-lived bearer credential for API requests
    pub access_token: String,
}

/// Session lifecycle events published by the session manager
///
/// Observed through [`super::SessionManager::subscribe`]. The shell treats
/// `Expired` as the signal to drop to the unauthenticated entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionEvent {
    /// Normal operation (initial state)
    Active,
    /// The refresh credential was rejected; the session cannot recover
    Expired,
}
