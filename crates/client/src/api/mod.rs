//! Authenticated API client for the PeakForm backend
//!
//! This module provides the HTTP-based client every endpoint service is
//! built on.
//!
//! # Architecture
//!
//! - Uses the crate's `HttpClient` (no direct reqwest in callers)
//! - Bearer credential attached on dispatch, never on the refresh call
//! - Unauthorized responses recovered through one single-flight refresh
//!   followed by a single re-issue of the original request
//! - No other retries: transport errors and non-401 statuses propagate
//!   unchanged

pub mod auth;
pub mod client;
pub mod errors;

pub use auth::{AuthApi, RefreshEndpoint};
pub use client::ApiClient;
pub use errors::{ApiError, ApiErrorCategory};
