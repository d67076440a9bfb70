//! Generation service client.
//!
//! The pipeline talks to the service through the `TextGenerator` trait so
//! tests can substitute a scripted implementation. The production
//! implementation speaks the OpenAI-compatible chat-completions protocol.

mod config;
mod http;
mod types;

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};
use url::Url;
use uuid::Uuid;

pub use config::ClientConfig;
pub use types::ChatMessage;

use http::send_with_retry;
use types::{ChatRequest, ChatResponse};

/// Generation requests can take minutes for large files.
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// The external text-generation collaborator.
///
/// `Ok(None)` means the service definitively failed to produce any content;
/// transport and protocol failures are `Err`. An empty string is a real
/// answer (the documented "already satisfied" reply) and comes back as
/// `Some("")`. The pipeline raises on `None` for mandatory stages and skips
/// for the per-file stage.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn ask(&self, messages: &[ChatMessage]) -> Result<Option<String>>;
}

/// Chat-completions client.
pub struct OpenAiClient {
    client: Client,
    config: ClientConfig,
    user_agent: String,
    session_id: String,
}

impl OpenAiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            config,
            user_agent: format!("autoglot/{}", env!("CARGO_PKG_VERSION")),
            session_id: Uuid::new_v4().to_string(),
        })
    }

    fn completions_url(&self) -> Result<Url> {
        // Url::join drops the last path segment of a base without a
        // trailing slash, so `…/v1` would lose its `v1`.
        let mut base_url = self.config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base = Url::parse(&base_url)
            .with_context(|| format!("invalid base URL: {}", self.config.base_url))?;
        base.join("chat/completions")
            .context("failed to build chat/completions URL")
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn ask(&self, messages: &[ChatMessage]) -> Result<Option<String>> {
        let url = self.completions_url()?;
        let request_id = Uuid::new_v4().to_string();
        let body = ChatRequest {
            model: &self.config.model,
            messages,
            stream: false,
        };

        debug!("generation request to {} (id {})", url, request_id);

        let response = send_with_retry(|| {
            self.client
                .post(url.clone())
                .header("Content-Type", "application/json")
                .header("User-Agent", &self.user_agent)
                .header("x-request-id", &request_id)
                .header("x-request-session-id", &self.session_id)
                .bearer_auth(&self.config.api_key)
                .json(&body)
        })
        .await
        .with_context(|| format!("failed to reach {}", url))?;

        let status = response.status();
        debug!("generation response status {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            error!("generation request failed with {}: {}", status, error_text);
            anyhow::bail!("generation request failed with {}: {}", status, error_text);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("failed to parse generation response")?;

        Ok(response_content(parsed))
    }
}

/// Pull the assistant content out of a parsed response.
///
/// An empty string is a real answer (the system prompt's "already
/// satisfied" reply) and must stay distinct from absent content, which is
/// the definitive-failure case callers treat as fatal on mandatory stages.
fn response_content(parsed: ChatResponse) -> Option<String> {
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
}
