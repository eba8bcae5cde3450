//! API-specific error types
//!
//! Error classification for API operations, following the backend's status
//! taxonomy: transport errors and unrecognized statuses pass through
//! unchanged, unauthorized responses feed the refresh recovery, and a
//! failed refresh surfaces as the distinguishable `SessionExpired` kind.

use peakform_common::auth::SessionError;
use peakform_domain::PeakFormError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401/403, failed session refresh)
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except auth)
    Client,
    /// Network/connection errors
    Network,
    /// Configuration errors
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) | Self::SessionExpired(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Whether the session is over and the shell should drop to login
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired(_))
    }
}

/// Convert from PeakFormError to ApiError
impl From<PeakFormError> for ApiError {
    fn from(err: PeakFormError) -> Self {
        match err {
            PeakFormError::Network(message) => Self::Network(message),
            PeakFormError::Auth(message) => Self::Auth(message),
            PeakFormError::SessionExpired(message) => Self::SessionExpired(message),
            PeakFormError::Config(message) => Self::Config(message),
            PeakFormError::NotFound(message) | PeakFormError::InvalidInput(message) => {
                Self::Client(message)
            }
            PeakFormError::Internal(message) => Self::Server(message),
        }
    }
}

/// Convert from SessionError to ApiError
impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Expired(message) => Self::SessionExpired(message),
            SessionError::Transport(message) => Self::Network(message),
            SessionError::Store(message) => Self::Config(message),
        }
    }
}
