use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::extract::extract_spec;
use crate::figma::FigmaClient;
use crate::llm::GeminiClient;
use crate::prompt::{build_chat_prompt, build_generate_prompt, BannerBrief};
use crate::publish::Publisher;
use crate::spec::DesignSpec;

/// Shared, read-only collaborators handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gemini: GeminiClient,
    pub figma: FigmaClient,
    pub publisher: Publisher,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gemini = GeminiClient::new(&config);
        let figma = FigmaClient::new(&config);
        let publisher = Publisher::new(figma.clone(), &config);
        Self {
            config: Arc::new(config),
            gemini,
            figma,
            publisher,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let index = state.config.static_dir.join("index.html");

    // Permissive CORS; every OPTIONS request is answered here with an empty 200.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route_service("/", ServeFile::new(index))
        .route("/api/health", get(health))
        .route("/api/generate", post(generate))
        .route("/api/chat", post(chat))
        .route("/api/figma/verify", post(figma_verify))
        .route("/api/figma/create", post(figma_create))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[derive(Serialize)]
struct GenerateResponse {
    status: &'static str,
    design_spec: Value,
    design_brief: String,
}

async fn generate(
    State(state): State<AppState>,
    body: std::result::Result<Json<BannerBrief>, JsonRejection>,
) -> Result<Json<GenerateResponse>> {
    let Json(brief) = body.map_err(bad_request)?;

    let prompt = build_generate_prompt(&brief, &state.config.font_family);
    let raw = state.gemini.generate_text(&prompt).await?;
    let design_spec = extract_spec(&raw)?;

    let design_brief = design_spec
        .get("design_brief")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Json(GenerateResponse {
        status: "success",
        design_spec,
        design_brief,
    }))
}

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    context: String,
}

#[derive(Serialize)]
struct ChatResponse {
    status: &'static str,
    reply: String,
}

async fn chat(
    State(state): State<AppState>,
    body: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let Json(req) = body.map_err(bad_request)?;

    let prompt = build_chat_prompt(&req.context, &req.message);
    let reply = state.gemini.generate_text(&prompt).await?;

    Ok(Json(ChatResponse {
        status: "success",
        reply,
    }))
}

#[derive(Deserialize)]
struct VerifyRequest {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Serialize)]
struct VerifyResponse {
    status: &'static str,
    name: String,
    email: String,
}

async fn figma_verify(
    State(state): State<AppState>,
    body: std::result::Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>> {
    let Json(req) = body.map_err(bad_request)?;
    let token = non_empty(req.token).ok_or(AppError::MissingToken("토큰 없음"))?;

    let user = state.figma.me(&token).await?;

    Ok(Json(VerifyResponse {
        status: "success",
        name: user.handle,
        email: user.email,
    }))
}

#[derive(Deserialize)]
struct CreateRequest {
    design_spec: DesignSpec,
    #[serde(default)]
    file_key: Option<String>,
}

#[derive(Serialize)]
struct CreateResponse {
    status: &'static str,
    file_key: String,
    url: String,
}

async fn figma_create(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreateResponse>> {
    let Json(body) = body.map_err(bad_request)?;

    // The token is checked before the spec so a missing token wins over a bad spec.
    let token = body
        .get("figma_token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or(AppError::MissingToken("Figma 토큰 없음"))?;

    let req: CreateRequest = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("invalid design_spec: {e}")))?;
    let file_key = non_empty(req.file_key);

    let published = state
        .publisher
        .publish(&token, &req.design_spec, file_key.as_deref())
        .await?;

    Ok(Json(CreateResponse {
        status: "success",
        file_key: published.file_key,
        url: published.url,
    }))
}

fn bad_request(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
