//! User and profile types
//!
//! Account identity plus the public profile rendered on profile screens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account identity as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public profile with social counters
///
/// `is_following` is relative to the authenticated viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub follower_count: u64,
    pub following_count: u64,
    pub post_count: u64,
    pub is_following: bool,
}

/// Login payload for `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration payload for `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Partial profile update payload
///
/// Only the present fields are changed; the backend treats absent fields as
/// untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_round_trips_camel_case() {
        let json = r#"{
            "id": "0191e6a8-4c6e-7d0a-b1df-2f4b6a8c9e01",
            "username": "lifter42",
            "email": "lifter42@example.com",
            "displayName": "Lifter",
            "avatarUrl": null,
            "createdAt": "2025-06-01T08:30:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "lifter42");
        assert_eq!(user.display_name.as_deref(), Some("Lifter"));

        let back = serde_json::to_value(&user).unwrap();
        assert!(back.get("displayName").is_some());
        assert!(back.get("display_name").is_none());
    }

    #[test]
    fn test_profile_flattens_user() {
        let json = r#"{
            "id": "0191e6a8-4c6e-7d0a-b1df-2f4b6a8c9e01",
            "username": "lifter42",
            "email": "lifter42@example.com",
            "displayName": null,
            "avatarUrl": null,
            "createdAt": "2025-06-01T08:30:00Z",
            "bio": "Deadlifts and coffee",
            "location": "Oslo",
            "followerCount": 10,
            "followingCount": 25,
            "postCount": 3,
            "isFollowing": true
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.user.username, "lifter42");
        assert_eq!(profile.follower_count, 10);
        assert!(profile.is_following);
    }

    #[test]
    fn test_profile_patch_skips_absent_fields() {
        let patch = ProfilePatch { bio: Some("new bio".to_string()), ..Default::default() };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"bio":"new bio"}"#);
    }
}
