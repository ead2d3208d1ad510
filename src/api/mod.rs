use crate::chat::{ChatBackend, SessionHandshake};
use crate::config::Config;
use crate::errors::HatchbotError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Wire shape of `POST /chat/new` and `POST /chat`. The send endpoint echoes
/// `session_id` too; we deserialize it but never re-key from it.
#[derive(Debug, Deserialize)]
struct ChatReply {
    response: String,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryReply {
    summary: String,
}

#[derive(Debug, Deserialize)]
struct HealthReply {
    status: String,
}

/// HTTP client for the portal backend, one per base address.
pub struct PortalClient {
    base_url: String,
    client: Client,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl PortalClient {
    /// Build from config, taking base address and timeouts from it.
    pub fn from_config(config: &Config) -> Self {
        Self::from_config_at(config, config.api_base_url())
    }

    /// Build from config but against an explicit base address (`--api-url`).
    /// Timeouts still come from the config.
    pub fn from_config_at(config: &Config, base_url: impl Into<String>) -> Self {
        Self::with_timeouts(
            base_url,
            config.api.connect_timeout_secs,
            config.api.request_timeout_secs,
        )
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_timeouts(base_url, CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS)
    }

    fn with_timeouts(base_url: impl Into<String>, connect_secs: u64, request_secs: u64) -> Self {
        let base_url = base_url.into();
        let connect_timeout = Duration::from_secs(connect_secs);
        let request_timeout = Duration::from_secs(request_secs);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder()
                .connect_timeout(connect_timeout)
                .timeout(request_timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            connect_timeout,
            request_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-2xx response to a typed error, consuming the body for detail.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        // FastAPI error bodies look like {"detail": "..."}
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
            .unwrap_or(body);
        Err(HatchbotError::Api { status, message }.into())
    }

    pub async fn new_session(&self) -> Result<SessionHandshake> {
        let resp = self
            .client
            .post(self.endpoint("/chat/new"))
            .send()
            .await
            .map_err(|e| HatchbotError::Transport(e.to_string()))?;
        let resp = Self::check_status(resp).await?;

        let reply: ChatReply = resp
            .json()
            .await
            .context("Failed to parse new-session response")?;
        let session_id = reply
            .session_id
            .context("New-session response is missing session_id")?;

        Ok(SessionHandshake {
            session_id,
            greeting: reply.response,
        })
    }

    pub async fn send_message(&self, text: &str, session_id: Option<&str>) -> Result<String> {
        let payload = json!({
            "message": text,
            "session_id": session_id,
        });

        let resp = self
            .client
            .post(self.endpoint("/chat"))
            .json(&payload)
            .send()
            .await
            .map_err(|e| HatchbotError::Transport(e.to_string()))?;
        let resp = Self::check_status(resp).await?;

        let reply: ChatReply = resp.json().await.context("Failed to parse chat response")?;
        Ok(reply.response)
    }

    pub async fn session_summary(&self, session_id: &str) -> Result<String> {
        let resp = self
            .client
            .get(self.endpoint(&format!("/chat/{}/summary", session_id)))
            .send()
            .await
            .map_err(|e| HatchbotError::Transport(e.to_string()))?;
        let resp = Self::check_status(resp).await?;

        let reply: SummaryReply = resp
            .json()
            .await
            .context("Failed to parse summary response")?;
        Ok(reply.summary)
    }

    /// Liveness probe against `GET /health`.
    pub async fn health(&self) -> Result<bool> {
        let resp = self
            .client
            .get(self.endpoint("/health"))
            .send()
            .await
            .map_err(|e| HatchbotError::Transport(e.to_string()))?;
        let resp = Self::check_status(resp).await?;

        let reply: HealthReply = resp
            .json()
            .await
            .context("Failed to parse health response")?;
        Ok(reply.status == "healthy")
    }
}

#[async_trait]
impl ChatBackend for PortalClient {
    async fn new_session(&self) -> Result<SessionHandshake> {
        PortalClient::new_session(self).await
    }

    async fn send_message(&self, text: &str, session_id: Option<&str>) -> Result<String> {
        PortalClient::send_message(self, text, session_id).await
    }

    async fn session_summary(&self, session_id: &str) -> Result<String> {
        PortalClient::session_summary(self, session_id).await
    }
}
