mod common;

use axum::http::{Method, StatusCode};
use common::{gemini_reply, send, send_raw, sent_bodies, setup, setup_with, API_KEY, GEMINI_PATH};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

// ── health / landing / CORS ───────────────────────────────────────

#[tokio::test]
async fn health_reports_ok() {
    let (_upstream, app) = setup().await;
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn root_serves_landing_page() {
    let (_upstream, app) = setup().await;
    let (status, _, bytes) = send_raw(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(bytes).unwrap().contains("배너 생성기"));
}

#[tokio::test]
async fn options_preflight_is_answered_with_cors_headers() {
    let (_upstream, app) = setup().await;
    let (status, headers, bytes) = send_raw(&app, Method::OPTIONS, "/api/generate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.is_empty());
    assert_eq!(headers["access-control-allow-origin"], "*");
}

// ── /api/generate ─────────────────────────────────────────────────

#[tokio::test]
async fn generate_strips_fences_and_returns_spec() {
    let (upstream, app) = setup().await;
    let reply = "```json\n{\"width\": 1200, \"height\": 628, \"texts\": [], \"design_brief\": \"시원한 여름 톤\"}\n```";

    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(header("x-goog-api-key", API_KEY))
        .and(body_string_contains("1200x628px"))
        .and(body_string_contains("페이스북 광고"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(reply)))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/generate",
        Some(json!({ "width": 1200, "height": 628, "purpose": "페이스북 광고" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["design_spec"],
        json!({ "width": 1200, "height": 628, "texts": [], "design_brief": "시원한 여름 톤" })
    );
    assert_eq!(body["design_brief"], "시원한 여름 톤");
}

#[tokio::test]
async fn generate_unwraps_single_element_array() {
    let (upstream, app) = setup().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_reply(r#"[{"width": 300, "height": 250}]"#)),
        )
        .mount(&upstream)
        .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/generate",
        Some(json!({ "width": 300, "height": 250, "purpose": "디스플레이 광고" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["design_spec"], json!({ "width": 300, "height": 250 }));
    assert_eq!(body["design_brief"], "");
}

#[tokio::test]
async fn generate_reports_unparseable_reply_with_raw_text() {
    let (upstream, app) = setup().await;
    let reply = "물론이죠! 멋진 배너를 만들어 드릴게요.";
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(reply)))
        .mount(&upstream)
        .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/generate",
        Some(json!({ "width": 1080, "height": 1080, "purpose": "인스타그램" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "status": "error", "error": "스펙 파싱 실패", "raw": reply })
    );
}

#[tokio::test]
async fn generate_surfaces_upstream_error_payload() {
    let (upstream, app) = setup().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" }
        })))
        .mount(&upstream)
        .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/generate",
        Some(json!({ "width": 1080, "height": 1080, "purpose": "인스타그램" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Gemini 에러:"));
    assert!(error.contains("API key not valid"));
}

#[tokio::test]
async fn key_stays_out_of_the_request_url() {
    let (upstream, app) = setup().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("{}")))
        .mount(&upstream)
        .await;

    let (status, _) = send(&app, Method::POST, "/api/generate", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let requests = upstream.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn unreachable_upstream_does_not_leak_key() {
    let secret = "AIza-do-not-print";
    let (_upstream, app) = setup_with(|config| {
        config.gemini_api_key = secret.to_string();
        // Nothing listens on port 1.
        config.gemini_base_url = "http://127.0.0.1:1/v1beta".to_string();
    })
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/generate",
        Some(json!({ "width": 1080, "height": 1080, "purpose": "인스타그램" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], "error");
    assert!(!body.to_string().contains(secret));
}

#[tokio::test]
async fn generate_passes_missing_dimensions_as_null() {
    let (upstream, app) = setup().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("{}")))
        .mount(&upstream)
        .await;

    let (status, _) = send(&app, Method::POST, "/api/generate", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let sent = sent_bodies(&upstream, GEMINI_PATH).await;
    let prompt = sent[0]["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("nullxnullpx"));
}

#[tokio::test]
async fn generate_rejects_malformed_body() {
    let (_upstream, app) = setup().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/generate",
        Some(json!({ "width": "wide" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

// ── /api/chat ─────────────────────────────────────────────────────

#[tokio::test]
async fn chat_relays_reply_verbatim() {
    let (upstream, app) = setup().await;
    let advice = "헤드라인을 두 줄로 나누고 버튼을 오른쪽 아래로 옮기세요.";
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(body_string_contains("파란 배경 세일 배너"))
        .and(body_string_contains("버튼 위치 변경"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(advice)))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/chat",
        Some(json!({ "message": "버튼 위치 변경", "context": "파란 배경 세일 배너" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success", "reply": advice }));
}

#[tokio::test]
async fn chat_without_context_still_forwards() {
    let (upstream, app) = setup().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("좋아요")))
        .mount(&upstream)
        .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/chat",
        Some(json!({ "message": "더 밝게" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "좋아요");
}

#[tokio::test]
async fn chat_requires_message() {
    let (_upstream, app) = setup().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/chat",
        Some(json!({ "context": "배너" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}
