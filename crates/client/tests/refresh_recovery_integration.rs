//! End-to-end tests for unauthorized-response recovery
//!
//! Drives the whole stack (facade, services, API client, session manager,
//! refresh endpoint, cookie jar) against a mock backend and pins the
//! recovery contract on the wire:
//! - concurrent expiry collapses into one `POST /auth/refresh`
//! - the refresh credential travels only as a cookie
//! - a failed refresh ends the session for every in-flight request

#![allow(dead_code)]

mod support;

use std::time::Duration;

use peakform_client::ApiError;
use peakform_common::auth::SessionEvent;
use peakform_domain::{LoginRequest, PageQuery};
use serde_json::json;
use support::{client_for, page_json, post_json, user_json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn concurrent_expiry_issues_exactly_one_refresh_call() {
    let server = MockServer::start().await;

    // Requests carrying the stale credential are rejected.
    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    // Requests carrying the refreshed credential succeed.
    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(vec![], 1, 20, 0)),
        )
        .mount(&server)
        .await;

    // The delay keeps the refresh in flight while every 401 arrives, so the
    // queue has to absorb all of them behind one call.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "accessToken": "fresh" }))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.session().set_access_token("stale".to_string()).await.unwrap();

    // Three list screens fetch at mount time, all with the expired token.
    let (a, b, c) = tokio::join!(
        client.feed().feed(PageQuery::default()),
        client.feed().feed(PageQuery::default()),
        client.feed().feed(PageQuery::default()),
    );

    assert!(a.is_ok() && b.is_ok() && c.is_ok(), "all requests must settle successfully");
    assert_eq!(client.session().access_token().await.as_deref(), Some("fresh"));
    // The expect(1) on the refresh mock verifies the single-flight property
    // when the server is dropped.
}

#[tokio::test]
async fn failed_refresh_ends_session_for_every_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string("refresh credential revoked")
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.session().set_access_token("stale".to_string()).await.unwrap();
    let mut events = client.session().subscribe();

    let (a, b, c) = tokio::join!(
        client.feed().feed(PageQuery::default()),
        client.feed().feed(PageQuery::default()),
        client.feed().feed(PageQuery::default()),
    );

    for result in [a, b, c] {
        assert!(matches!(result, Err(ApiError::SessionExpired(_))));
    }

    assert!(!client.session().is_authenticated().await, "credential must be cleared");

    // The expiry signal fires exactly once regardless of queue depth.
    assert!(events.has_changed().unwrap());
    assert_eq!(*events.borrow_and_update(), SessionEvent::Expired);
    assert!(!events.has_changed().unwrap());
}

#[tokio::test]
async fn refresh_credential_travels_as_cookie_from_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "refreshToken=r1; Path=/; HttpOnly")
                .set_body_json(json!({
                    "accessToken": "short-lived",
                    "user": user_json("lifter42"),
                })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header("Authorization", "Bearer short-lived"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header("Authorization", "Bearer rotated"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(vec![], 1, 20, 0)),
        )
        .mount(&server)
        .await;

    // The refresh call must present the cookie minted at login.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header("cookie", "refreshToken=r1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "accessToken": "rotated" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = LoginRequest {
        email: "lifter42@example.com".to_string(),
        password: "hunter2".to_string(),
    };
    client.auth().login(&request).await.unwrap();

    let feed = client.feed().feed(PageQuery::default()).await.unwrap();
    assert!(feed.items.is_empty());
    assert_eq!(client.session().access_token().await.as_deref(), Some("rotated"));

    // No Authorization header ever reaches the refresh endpoint.
    let refresh_requests: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == "/auth/refresh")
        .collect();
    assert_eq!(refresh_requests.len(), 1);
    assert!(refresh_requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn recovered_request_reaches_caller_with_original_semantics() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/0191e6a8-5d7f-7e1b-c2ea-3a5c7b9dae02"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/posts/0191e6a8-5d7f-7e1b-c2ea-3a5c7b9dae02"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(post_json("0191e6a8-5d7f-7e1b-c2ea-3a5c7b9dae02", "Morning 10k")),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "accessToken": "fresh" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.session().set_access_token("stale".to_string()).await.unwrap();

    let post = client
        .feed()
        .post("0191e6a8-5d7f-7e1b-c2ea-3a5c7b9dae02".parse().unwrap())
        .await
        .unwrap();

    // Silent recovery: the caller sees the response as if nothing happened.
    assert_eq!(post.body, "Morning 10k");
}

#[tokio::test]
async fn non_401_errors_bypass_recovery_entirely() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.session().set_access_token("stale".to_string()).await.unwrap();

    let result = client.feed().feed(PageQuery::default()).await;
    assert!(matches!(result, Err(ApiError::Server(_))));
}
