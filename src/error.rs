use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Everything the relay can report back to a caller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    MissingToken(&'static str),

    #[error("유효하지 않은 토큰")]
    InvalidToken,

    #[error("{0}")]
    BadRequest(String),

    /// The generative service answered without any candidates.
    #[error("Gemini 에러: {0}")]
    Generative(String),

    #[error("스펙 파싱 실패")]
    SpecParse { raw: String },

    /// Non-success reply from the design platform, body relayed as-is.
    #[error("{0}")]
    Figma(String),

    #[error("upstream request failed: {0}")]
    Http(reqwest::Error),
}

// Request URLs can carry credentials, so they never reach a response body.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Http(err.without_url())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken(_)
            | AppError::InvalidToken
            | AppError::BadRequest(_)
            | AppError::Figma(_) => StatusCode::BAD_REQUEST,
            AppError::Generative(_) | AppError::SpecParse { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Http(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::SpecParse { raw } => json!({
                "status": "error",
                "error": self.to_string(),
                "raw": raw,
            }),
            _ => json!({
                "status": "error",
                "error": self.to_string(),
            }),
        };
        (status, Json(body)).into_response()
    }
}
