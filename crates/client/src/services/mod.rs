//! Typed endpoint services
//!
//! One module per screen-domain of the application: feed, profiles,
//! workouts, statistics. Each service is a thin wrapper over
//! [`crate::api::ApiClient`] that fixes paths and payload types; recovery
//! and credential handling happen underneath.

pub mod feed;
pub mod profile;
pub mod stats;
pub mod workout;

pub use feed::FeedService;
pub use profile::ProfileService;
pub use stats::StatsService;
pub use workout::WorkoutService;
