//! # PeakForm Client
//!
//! Typed client SDK for the PeakForm fitness-social backend.
//!
//! This crate contains:
//! - HTTP transport with a shared cookie jar ([`http`])
//! - The authenticated API client with transparent credential recovery
//!   ([`api`])
//! - Typed endpoint services for feed, profiles, workouts, and statistics
//!   ([`services`])
//! - Configuration loading ([`config`])
//!
//! ## Usage
//!
//! ```no_run
//! use peakform_client::PeakFormClient;
//! use peakform_domain::{LoginRequest, PageQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = peakform_client::config::load()?;
//!     let client = PeakFormClient::new(config)?;
//!
//!     let request = LoginRequest {
//!         email: "lifter42@example.com".to_string(),
//!         password: "hunter2".to_string(),
//!     };
//!     client.auth().login(&request).await?;
//!
//!     let feed = client.feed().feed(PageQuery::default()).await?;
//!     for post in &feed.items {
//!         println!("{}: {}", post.author.username, post.body);
//!     }
//!
//!     // React to terminal session expiry (failed refresh) in the shell.
//!     let mut events = client.session().subscribe();
//!     tokio::spawn(async move {
//!         if events.changed().await.is_ok() {
//!             // navigate to the unauthenticated entry point
//!         }
//!     });
//!
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use peakform_common::auth::{CredentialStore, MemoryCredentialStore, SessionManager};
use peakform_domain::ClientConfig;

pub mod api;
pub mod config;
pub mod http;
pub mod services;

pub use api::{ApiClient, ApiError, ApiErrorCategory, AuthApi, RefreshEndpoint};
pub use http::HttpClient;
pub use services::{FeedService, ProfileService, StatsService, WorkoutService};

/// Assembled PeakForm client
///
/// Owns the session for one application run and exposes the endpoint
/// services over a single shared transport (one connection pool, one
/// cookie jar).
pub struct PeakFormClient {
    session: Arc<SessionManager>,
    auth: AuthApi,
    feed: FeedService,
    profiles: ProfileService,
    workouts: WorkoutService,
    stats: StatsService,
}

impl PeakFormClient {
    /// Create a client with in-memory credential storage
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP transport
    /// cannot be built
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        Self::builder().config(config).build()
    }

    /// Create a builder for fluent configuration
    #[must_use]
    pub fn builder() -> PeakFormClientBuilder {
        PeakFormClientBuilder::default()
    }

    /// Session handle (credential state, expiry events)
    #[must_use]
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Authentication flows
    #[must_use]
    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    /// Social feed
    #[must_use]
    pub fn feed(&self) -> &FeedService {
        &self.feed
    }

    /// User profiles and the follow graph
    #[must_use]
    pub fn profiles(&self) -> &ProfileService {
        &self.profiles
    }

    /// Workout logging
    #[must_use]
    pub fn workouts(&self) -> &WorkoutService {
        &self.workouts
    }

    /// Statistics dashboards
    #[must_use]
    pub fn stats(&self) -> &StatsService {
        &self.stats
    }
}

/// Builder for [`PeakFormClient`]
#[derive(Default)]
pub struct PeakFormClientBuilder {
    config: Option<ClientConfig>,
    store: Option<Arc<dyn CredentialStore>>,
}

impl PeakFormClientBuilder {
    /// Set the client configuration
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a custom credential store (defaults to in-memory)
    #[must_use]
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP transport
    /// cannot be built
    pub fn build(self) -> Result<PeakFormClient, ApiError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .user_agent(config.api.user_agent.clone())
            .build()?;

        let store =
            self.store.unwrap_or_else(|| Arc::new(MemoryCredentialStore::new()));
        let transport = Arc::new(RefreshEndpoint::new(http.clone(), &config.api.base_url));
        let session = Arc::new(SessionManager::new(transport, store));

        let api = Arc::new(ApiClient::new(http, &config.api, session.clone()));

        Ok(PeakFormClient {
            auth: AuthApi::new(api.clone(), session.clone()),
            feed: FeedService::new(api.clone()),
            profiles: ProfileService::new(api.clone()),
            workouts: WorkoutService::new(api.clone()),
            stats: StatsService::new(api),
            session,
        })
    }
}
