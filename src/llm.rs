use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::{AppError, Result};

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    url: String,
    api_key: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            url: config.gemini_url(),
            api_key: config.gemini_api_key.clone(),
        }
    }

    /// Send a single-turn prompt and return the first candidate's text.
    ///
    /// A reply without `candidates` (quota errors, bad keys, blocked prompts)
    /// comes back as [`AppError::Generative`] carrying the whole payload.
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let resp = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::warn!(error = %e, "generative service unreachable");
                e
            })?;

        let status = resp.status();
        let body: Value = resp.json().await?;

        first_candidate_text(&body).ok_or_else(|| {
            tracing::warn!(%status, "generative service returned no candidates");
            AppError::Generative(body.to_string())
        })
    }
}

fn first_candidate_text(body: &Value) -> Option<String> {
    let reply: GenerateResponse = serde_json::from_value(body.clone()).ok()?;
    let candidate = reply.candidates?.into_iter().next()?;
    let part = candidate.content.parts.into_iter().next()?;
    Some(part.text)
}
