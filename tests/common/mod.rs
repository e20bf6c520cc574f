#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use devlink_api::auth::TokenService;
use devlink_api::store::MemoryStore;
use devlink_api::{app, AppState};

/// Router over a fresh in-memory store; no network, no database.
pub fn test_app() -> Router {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        TokenService::new("integration-test-secret", 360_000),
    );
    app(state)
}

pub async fn send(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("x-auth-token", token);
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

/// Register an account and return its token.
pub async fn register(app: &Router, name: &str, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "name": name, "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {}", body);
    body["token"].as_str().expect("token").to_string()
}
