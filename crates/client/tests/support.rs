//! Shared helpers for client integration tests

use peakform_client::PeakFormClient;
use peakform_domain::{ApiConfig, ClientConfig};
use serde_json::{json, Value};
use wiremock::MockServer;

/// Build a client wired against the given mock server
pub fn client_for(server: &MockServer) -> PeakFormClient {
    let config = ClientConfig {
        api: ApiConfig { base_url: server.uri(), ..Default::default() },
    };
    PeakFormClient::new(config).expect("client should build against mock server")
}

pub fn user_json(username: &str) -> Value {
    json!({
        "id": "0191e6a8-4c6e-7d0a-b1df-2f4b6a8c9e01",
        "username": username,
        "email": format!("{username}@example.com"),
        "displayName": null,
        "avatarUrl": null,
        "createdAt": "2025-06-01T08:30:00Z"
    })
}

pub fn post_json(id: &str, body: &str) -> Value {
    json!({
        "id": id,
        "author": user_json("runner9"),
        "body": body,
        "workoutSessionId": null,
        "likeCount": 0,
        "commentCount": 0,
        "likedByMe": false,
        "createdAt": "2025-06-02T07:15:00Z",
        "updatedAt": "2025-06-02T07:15:00Z"
    })
}

pub fn page_json(items: Vec<Value>, page: u32, per_page: u32, total: u64) -> Value {
    json!({
        "items": items,
        "page": page,
        "perPage": per_page,
        "total": total
    })
}

pub fn profile_json(username: &str, follower_count: u64, is_following: bool) -> Value {
    let mut profile = user_json(username);
    let extra = json!({
        "bio": "Deadlifts and coffee",
        "location": "Oslo",
        "followerCount": follower_count,
        "followingCount": 12,
        "postCount": 3,
        "isFollowing": is_following
    });
    merge(&mut profile, extra);
    profile
}

pub fn workout_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "ownerId": "0191e6a8-4c6e-7d0a-b1df-2f4b6a8c9e01",
        "title": title,
        "notes": null,
        "startedAt": "2025-06-03T17:00:00Z",
        "endedAt": "2025-06-03T18:00:00Z",
        "durationSeconds": 3600,
        "exercises": [
            {
                "name": "Bench Press",
                "sets": [
                    { "reps": 5, "weightKg": 100.0 },
                    { "reps": 3, "weightKg": 110.0 }
                ]
            }
        ]
    })
}

fn merge(base: &mut Value, extra: Value) {
    if let (Value::Object(base), Value::Object(extra)) = (base, extra) {
        base.extend(extra);
    }
}
