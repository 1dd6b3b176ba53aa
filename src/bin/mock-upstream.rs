//! Stand-in for both upstream platforms during local development.
//!
//! Point the relay at it with
//! `GEMINI_BASE_URL=http://localhost:8081/v1beta FIGMA_API_BASE=http://localhost:8081/v1`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SAMPLE_SPEC: &str = r#"```json
{
  "width": 1200,
  "height": 628,
  "background": null,
  "gradient": [
    {"position": 0, "color": {"r": 0.1, "g": 0.1, "b": 0.9, "a": 1}},
    {"position": 1, "color": {"r": 0.5, "g": 0.0, "b": 0.8, "a": 1}}
  ],
  "shapes": [
    {"name": "Button", "type": "RECTANGLE", "x": 40, "y": 520, "width": 220, "height": 56, "color": {"r": 1, "g": 0.85, "b": 0.2}, "opacity": 1, "corner_radius": 28}
  ],
  "texts": [
    {"name": "Headline", "text": "여름 한정 세일", "x": 40, "y": 80, "width": 1120, "size": 72, "weight": 700, "font": "Inter", "align": "LEFT", "color": {"r": 1, "g": 1, "b": 1}},
    {"name": "CTA", "text": "지금 구매하기", "x": 60, "y": 534, "width": 180, "size": 20, "weight": 600, "font": "Inter", "align": "CENTER", "color": {"r": 0.1, "g": 0.1, "b": 0.2}}
  ],
  "design_brief": "보라-파랑 그라디언트 위에 큰 헤드라인과 노란 CTA 버튼"
}
```"#;

#[derive(Clone, Default)]
struct MockState {
    files_created: Arc<AtomicUsize>,
    frames_appended: Arc<AtomicUsize>,
}

fn has_token(headers: &HeaderMap) -> bool {
    headers
        .get("X-Figma-Token")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|t| !t.is_empty() && t != "invalid")
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "status": 403, "err": "Invalid token" })),
    )
        .into_response()
}

async fn generate_content(Json(body): Json<Value>) -> Json<Value> {
    let prompt = body
        .pointer("/contents/0/parts/0/text")
        .and_then(Value::as_str)
        .unwrap_or_default();
    info!("gemini prompt ({} chars)", prompt.chars().count());

    // Design prompts get a spec, anything else gets advice.
    let text = if prompt.contains("JSON") {
        SAMPLE_SPEC.to_string()
    } else {
        "헤드라인 크기를 72에서 84로 키우고 버튼 색을 더 진하게 바꿔보세요.".to_string()
    };

    Json(json!({
        "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
    }))
}

async fn me(headers: HeaderMap) -> Response {
    if !has_token(&headers) {
        return forbidden();
    }
    Json(json!({ "id": "1", "handle": "mock-designer", "email": "designer@example.com" }))
        .into_response()
}

async fn create_file(State(state): State<MockState>, headers: HeaderMap) -> Response {
    if !has_token(&headers) {
        return forbidden();
    }
    let n = state.files_created.fetch_add(1, Ordering::SeqCst) + 1;
    info!("created mock file #{n}");
    Json(json!({ "key": format!("mockfile{n}") })).into_response()
}

async fn get_file(
    State(state): State<MockState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !has_token(&headers) {
        return forbidden();
    }

    // One 1080-wide frame per append so far, laid out left to right.
    let frames: Vec<Value> = (0..state.frames_appended.load(Ordering::SeqCst) + 1)
        .map(|i| {
            json!({
                "id": format!("1:{i}"),
                "type": "FRAME",
                "absoluteBoundingBox": { "x": i as f64 * 1120.0, "y": 0, "width": 1080, "height": 1080 }
            })
        })
        .collect();

    Json(json!({
        "name": key,
        "document": { "id": "0:0", "type": "DOCUMENT", "children": [{ "id": "0:1", "type": "CANVAS", "children": frames }] }
    }))
    .into_response()
}

async fn append_nodes(
    State(state): State<MockState>,
    Path(key): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !has_token(&headers) {
        return forbidden();
    }
    let x = body.pointer("/nodes/0/x").cloned().unwrap_or(Value::Null);
    state.frames_appended.fetch_add(1, Ordering::SeqCst);
    info!("appended frame to {key} at x={x}");
    (StatusCode::CREATED, Json(json!({ "status": "ok" }))).into_response()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let port = std::env::var("MOCK_PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8081);

    let app = Router::new()
        .route("/v1beta/models/:model_action", post(generate_content))
        .route("/v1/me", get(me))
        .route("/v1/files", post(create_file))
        .route("/v1/files/:key", get(get_file))
        .route("/v1/files/:key/nodes", post(append_nodes))
        .with_state(MockState::default());

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("mock upstream listening on http://{addr}");
    info!("gemini: http://{addr}/v1beta  figma: http://{addr}/v1");

    axum::serve(listener, app).await?;
    Ok(())
}
