use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::publish::PublishedFile;

/// Blocking client for a running relay.
pub struct RelayClient {
    agent: ureq::Agent,
    base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedSpec {
    pub design_spec: Value,
    #[serde(default)]
    pub design_brief: String,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    reply: String,
}

#[derive(Debug, Deserialize)]
struct Health {
    status: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn health(&self) -> Result<String> {
        let url = format!("{}/api/health", self.base_url);
        let resp = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| anyhow!("Failed to reach relay at {url}: {e}"))?;
        let health: Health = resp.into_json()?;
        Ok(health.status)
    }

    pub fn generate(
        &self,
        width: f64,
        height: f64,
        purpose: &str,
        requirements: &str,
    ) -> Result<GeneratedSpec> {
        self.post(
            "/api/generate",
            &json!({
                "width": width,
                "height": height,
                "purpose": purpose,
                "requirements": requirements,
            }),
        )
    }

    pub fn chat(&self, message: &str, context: &str) -> Result<String> {
        let reply: ChatReply = self.post(
            "/api/chat",
            &json!({ "message": message, "context": context }),
        )?;
        Ok(reply.reply)
    }

    pub fn publish(
        &self,
        figma_token: &str,
        design_spec: &Value,
        file_key: Option<&str>,
    ) -> Result<PublishedFile> {
        self.post(
            "/api/figma/create",
            &json!({
                "figma_token": figma_token,
                "design_spec": design_spec,
                "file_key": file_key,
            }),
        )
    }

    fn post<B, O>(&self, path: &str, body: &B) -> Result<O>
    where
        B: Serialize,
        O: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        match self.agent.post(&url).send_json(body) {
            Ok(resp) => Ok(resp.into_json()?),
            Err(ureq::Error::Status(code, resp)) => {
                let body: Value = resp.into_json().unwrap_or(Value::Null);
                Err(anyhow!("Relay returned {code}: {}", error_text(&body)))
            }
            Err(e) => Err(anyhow!("Failed to reach relay at {url}: {e}")),
        }
    }
}

fn error_text(body: &Value) -> String {
    match body.get("error").and_then(Value::as_str) {
        Some(msg) => msg.to_string(),
        None => body.to_string(),
    }
}
