#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use banner_relay::config::Config;
use banner_relay::server::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::MockServer;

pub const GEMINI_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";
pub const API_KEY: &str = "test-key";

/// Relay wired to a single mock server standing in for both upstreams.
pub async fn setup() -> (MockServer, Router) {
    setup_with(|_| {}).await
}

/// Same as [`setup`], with a hook to adjust the config before the router is built.
pub async fn setup_with(adjust: impl FnOnce(&mut Config)) -> (MockServer, Router) {
    let upstream = MockServer::start().await;

    let mut config = Config::with_api_key(API_KEY);
    config.gemini_base_url = format!("{}/v1beta", upstream.uri());
    config.figma_api_base = format!("{}/v1", upstream.uri());
    config.static_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static");
    adjust(&mut config);

    (upstream, router(AppState::new(config)))
}

pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
    })
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, _, bytes) = send_raw(app, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes.to_vec())
}

/// JSON bodies the relay sent to `path`, in arrival order.
pub async fn sent_bodies(upstream: &MockServer, path: &str) -> Vec<Value> {
    upstream
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == path)
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}
