pub mod nodes;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, Result};
use nodes::{FigmaFile, FrameNode};

/// Name given to documents this relay creates.
pub const NEW_FILE_NAME: &str = "배너 작업 파일";

/// Thin REST client for the design platform. Tokens are per call and never stored.
#[derive(Clone)]
pub struct FigmaClient {
    http: Client,
    api_base: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FigmaUser {
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize)]
struct CreateFileRequest<'a> {
    name: &'a str,
    nodes: [&'a FrameNode; 1],
}

#[derive(Serialize)]
struct AppendNodesRequest<'a> {
    nodes: [&'a FrameNode; 1],
}

#[derive(Deserialize)]
struct CreateFileResponse {
    key: Option<String>,
}

impl FigmaClient {
    pub fn new(config: &Config) -> Self {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            api_base: config.figma_api_base.trim_end_matches('/').to_string(),
        }
    }

    fn authed(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("X-Figma-Token", token)
    }

    /// Look up the account behind `token`. Any non-200 means the token is unusable.
    pub async fn me(&self, token: &str) -> Result<FigmaUser> {
        let url = format!("{}/me", self.api_base);
        let resp = self.authed(self.http.get(&url), token).send().await?;

        if resp.status() != StatusCode::OK {
            tracing::warn!(status = %resp.status(), "figma rejected token");
            return Err(AppError::InvalidToken);
        }

        Ok(resp.json().await?)
    }

    /// Create a new document holding only `frame`; returns the assigned key.
    pub async fn create_file(&self, token: &str, frame: &FrameNode) -> Result<String> {
        let url = format!("{}/files", self.api_base);
        let resp = self
            .authed(self.http.post(&url), token)
            .json(&CreateFileRequest {
                name: NEW_FILE_NAME,
                nodes: [frame],
            })
            .send()
            .await?;

        let resp = ensure_created(resp).await?;
        let body: CreateFileResponse = resp.json().await?;
        body.key
            .ok_or_else(|| AppError::Figma("file created but no key was returned".to_string()))
    }

    /// Fetch a document for placement. `None` when the platform refuses.
    pub async fn get_file(&self, token: &str, file_key: &str) -> Result<Option<FigmaFile>> {
        let url = format!("{}/files/{}", self.api_base, file_key);
        let resp = self.authed(self.http.get(&url), token).send().await?;

        if resp.status() != StatusCode::OK {
            tracing::warn!(status = %resp.status(), file_key, "could not fetch figma file");
            return Ok(None);
        }

        Ok(Some(resp.json().await?))
    }

    pub async fn append_nodes(&self, token: &str, file_key: &str, frame: &FrameNode) -> Result<()> {
        let url = format!("{}/files/{}/nodes", self.api_base, file_key);
        let resp = self
            .authed(self.http.post(&url), token)
            .json(&AppendNodesRequest { nodes: [frame] })
            .send()
            .await?;

        ensure_created(resp).await?;
        Ok(())
    }
}

/// 200 and 201 both count as success; anything else is relayed verbatim.
async fn ensure_created(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status == StatusCode::OK || status == StatusCode::CREATED {
        return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    tracing::warn!(%status, "figma call failed");
    Err(AppError::Figma(text))
}
