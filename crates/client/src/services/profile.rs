//! Profile endpoints

use std::sync::Arc;

use peakform_domain::{Page, PageQuery, Post, ProfilePatch, UserProfile};

use crate::api::{ApiClient, ApiError};

/// Profile and follow-graph operations
pub struct ProfileService {
    api: Arc<ApiClient>,
}

impl ProfileService {
    /// Create the service over a shared client
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Fetch a user's public profile
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn profile(&self, username: &str) -> Result<UserProfile, ApiError> {
        self.api.get(&format!("/users/{username}")).await
    }

    /// Update the viewer's own profile
    ///
    /// Absent fields are left untouched by the backend.
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<UserProfile, ApiError> {
        self.api.patch("/profile", patch).await
    }

    /// Fetch one page of a user's posts
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn posts_by(
        &self,
        username: &str,
        query: PageQuery,
    ) -> Result<Page<Post>, ApiError> {
        self.api.get_query(&format!("/users/{username}/posts"), &query).await
    }

    /// Follow a user, returning their profile with updated counters
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn follow(&self, username: &str) -> Result<UserProfile, ApiError> {
        self.api.post_empty(&format!("/users/{username}/follow")).await
    }

    /// Unfollow a user, returning their profile with updated counters
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn unfollow(&self, username: &str) -> Result<UserProfile, ApiError> {
        self.api.delete(&format!("/users/{username}/follow")).await
    }
}
