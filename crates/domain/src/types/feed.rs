//! Social feed types
//!
//! Posts, comments, and the payloads that create them. Like/unlike carry no
//! body; the counters on [`Post`] reflect the server state at fetch time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// A feed post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub author: User,
    pub body: String,
    /// Workout session shared with this post, if any
    pub workout_session_id: Option<Uuid>,
    pub like_count: u64,
    pub comment_count: u64,
    /// Whether the authenticated viewer has liked this post
    pub liked_by_me: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a post
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_session_id: Option<Uuid>,
}

/// A comment on a post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author: User,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for adding a comment
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub body: String,
}
