//! Shared helpers for the end-to-end tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use devconnect_auth::JwtTokenService;
use devconnect_github::{GitHubError, RepoLookup, RepoSummary};
use devconnect_node::api::{create_router, AppState};
use devconnect_storage::MemoryBackend;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";

/// Knows a single GitHub user, `octocat`.
pub struct StubRepos;

#[async_trait]
impl RepoLookup for StubRepos {
    async fn list_repos(&self, username: &str) -> Result<Vec<RepoSummary>, GitHubError> {
        if username != "octocat" {
            return Err(GitHubError::Status {
                status: 404,
                username: username.to_string(),
            });
        }
        Ok(vec![RepoSummary {
            name: "hello-world".into(),
            full_name: "octocat/hello-world".into(),
            html_url: "https://github.com/octocat/hello-world".into(),
            description: Some("My first repository".into()),
            language: Some("Rust".into()),
            stargazers_count: 42,
            watchers_count: 42,
            forks_count: 7,
            created_at: None,
        }])
    }
}

pub fn create_test_state() -> AppState {
    AppState::new(
        Arc::new(MemoryBackend::new()),
        Arc::new(JwtTokenService::new(JWT_SECRET)),
        Arc::new(StubRepos),
    )
}

pub fn create_test_app() -> Router {
    create_router(create_test_state())
}

pub async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Send a request, optionally authenticated and with a JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("x-auth-token", token);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response).await)
}

/// Register a user and return their token.
pub async fn register(app: &Router, name: &str, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/users",
        None,
        Some(json!({ "name": name, "email": email, "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

/// The `_id` of the user a token belongs to.
pub async fn user_id(app: &Router, token: &str) -> String {
    let (status, body) = send(app, "GET", "/api/auth", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    body["_id"].as_str().unwrap().to_string()
}
