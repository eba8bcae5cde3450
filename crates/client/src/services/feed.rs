//! Social feed endpoints
//!
//! Paginated feed, posts, likes, and comments.

use std::sync::Arc;

use peakform_domain::{Comment, NewComment, NewPost, Page, PageQuery, Post};
use uuid::Uuid;

use crate::api::{ApiClient, ApiError};

/// Feed and post operations
pub struct FeedService {
    api: Arc<ApiClient>,
}

impl FeedService {
    /// Create the service over a shared client
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Fetch one page of the home feed
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn feed(&self, query: PageQuery) -> Result<Page<Post>, ApiError> {
        self.api.get_query("/feed", &query).await
    }

    /// Publish a post
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
        self.api.post("/posts", post).await
    }

    /// Fetch a single post
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn post(&self, id: Uuid) -> Result<Post, ApiError> {
        self.api.get(&format!("/posts/{id}")).await
    }

    /// Delete one of the viewer's posts
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn delete_post(&self, id: Uuid) -> Result<(), ApiError> {
        self.api.delete(&format!("/posts/{id}")).await
    }

    /// Like a post, returning it with updated counters
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn like(&self, id: Uuid) -> Result<Post, ApiError> {
        self.api.post_empty(&format!("/posts/{id}/like")).await
    }

    /// Remove the viewer's like, returning the post with updated counters
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn unlike(&self, id: Uuid) -> Result<Post, ApiError> {
        self.api.delete(&format!("/posts/{id}/like")).await
    }

    /// Fetch one page of a post's comments
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn comments(&self, id: Uuid, query: PageQuery) -> Result<Page<Comment>, ApiError> {
        self.api.get_query(&format!("/posts/{id}/comments"), &query).await
    }

    /// Add a comment to a post
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn add_comment(&self, id: Uuid, comment: &NewComment) -> Result<Comment, ApiError> {
        self.api.post(&format!("/posts/{id}/comments"), comment).await
    }

    /// Delete one of the viewer's comments
    ///
    /// # Errors
    /// Returns error if the request fails
    pub async fn delete_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<(), ApiError> {
        self.api.delete(&format!("/posts/{post_id}/comments/{comment_id}")).await
    }
}
