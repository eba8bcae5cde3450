//! Workout session endpoints

use std::sync::Arc;

use peakform_domain::{NewWorkoutSession, Page, PageQuery, WorkoutSession};
use uuid::Uuid;

use crate::api::{ApiClient, ApiError};

/// Workout logging operations
pub struct WorkoutService {
    api: Arc<ApiClient>,
}

impl WorkoutService {
    /// Create the service over a shared client
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Log a new workout session
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn log_session(
        &self,
        session: &NewWorkoutSession,
    ) -> Result<WorkoutSession, ApiError> {
        self.api.post("/workouts", session).await
    }

    /// Fetch one page of the viewer's sessions, newest first
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn sessions(&self, query: PageQuery) -> Result<Page<WorkoutSession>, ApiError> {
        self.api.get_query("/workouts", &query).await
    }

    /// Fetch a single session
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn session(&self, id: Uuid) -> Result<WorkoutSession, ApiError> {
        self.api.get(&format!("/workouts/{id}")).await
    }

    /// Delete one of the viewer's sessions
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn delete_session(&self, id: Uuid) -> Result<(), ApiError> {
        self.api.delete(&format!("/workouts/{id}")).await
    }
}
