//! HTTP API Handler Tests Infrastructure
//!
//! - `TestAppState` implements `HasMediator` with in-memory repositories
//! - Uses the production `build_router()` so real handlers are covered
//! - Helper functions for making HTTP requests (get_json, post_json, etc.)

pub mod country_http_test;

use crate::api::TestCountryRepository;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use motorpool_common::api::Readiness;
use motorpool_common::events::BroadcastEventBus;
use motorpool_common::Mediator;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tower::ServiceExt;
use vendor_configuration::application;
use vendor_configuration::server::build_router;
use vendor_configuration::state::HasMediator;

// ============================================================================
// Test App State
// ============================================================================

#[derive(Clone)]
pub struct TestAppState {
    pub mediator: Mediator,
    pub country_repo: Arc<TestCountryRepository>,
    pub events: BroadcastEventBus,
}

impl TestAppState {
    pub fn new() -> Self {
        let country_repo = Arc::new(TestCountryRepository::new());
        let events = BroadcastEventBus::default();
        let mediator = application::register(
            Mediator::builder(),
            country_repo.clone(),
            Arc::new(events.clone()),
        )
        .build();

        Self {
            mediator,
            country_repo,
            events,
        }
    }
}

impl Readiness for TestAppState {
    async fn check_ready(&self) -> bool {
        true
    }
}

impl HasMediator for TestAppState {
    fn mediator(&self) -> &Mediator {
        &self.mediator
    }
}

pub fn build_test_router(state: TestAppState) -> Router {
    build_router(state)
}

// ============================================================================
// HTTP Helpers
// ============================================================================

async fn send<R: DeserializeOwned>(
    app: &Router,
    request: Request<Body>,
) -> (StatusCode, Option<R>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    if body_bytes.is_empty() {
        return (status, None);
    }

    match serde_json::from_slice(&body_bytes) {
        Ok(data) => (status, Some(data)),
        Err(_) => (status, None),
    }
}

/// Make a GET request and parse JSON response
pub async fn get_json<R: DeserializeOwned>(app: &Router, path: &str) -> (StatusCode, Option<R>) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Make a POST request with JSON body and parse JSON response
pub async fn post_json<T: Serialize, R: DeserializeOwned>(
    app: &Router,
    path: &str,
    body: &T,
) -> (StatusCode, Option<R>) {
    post_json_as(app, path, body, None).await
}

/// POST on behalf of the user named in `x-user-id`
pub async fn post_json_as<T: Serialize, R: DeserializeOwned>(
    app: &Router,
    path: &str,
    body: &T,
    user: Option<&str>,
) -> (StatusCode, Option<R>) {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("Content-Type", "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let request = builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap();
    send(app, request).await
}

/// Make a PUT request with JSON body and parse JSON response
pub async fn put_json<T: Serialize, R: DeserializeOwned>(
    app: &Router,
    path: &str,
    body: &T,
) -> (StatusCode, Option<R>) {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap();
    send(app, request).await
}

/// Make a DELETE request and parse JSON response
pub async fn delete_json<R: DeserializeOwned>(app: &Router, path: &str) -> (StatusCode, Option<R>) {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}
