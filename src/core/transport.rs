//! Wire transport for chat-completion requests

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::core::config::{Credential, EndpointConfig};
use crate::core::errors::{CompletionError, Result};
use crate::core::models::{CompletionRequest, CompletionResponse};

/// Sends one completion request and decodes the reply
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Perform one request/response round-trip
    async fn send(&self, request: &CompletionRequest) -> Result<CompletionResponse>;
}

/// HTTP transport for OpenAI-compatible endpoints
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    api_key: Credential,
}

impl HttpTransport {
    /// Create a transport from endpoint configuration
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .build()?;

        Ok(Self {
            client,
            url: config.chat_completions_url(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        debug!("POST {} (model {})", self.url, request.model);

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            let parsed: CompletionResponse = serde_json::from_str(&body)?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();

        // Header must be read before the body consumes the response
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let error_text = response.text().await.unwrap_or_default();

        match status_code {
            401 | 403 => Err(CompletionError::AuthenticationError {
                status: status_code,
                message: error_text,
            }),
            429 => Err(CompletionError::RateLimitError { retry_after }),
            _ => Err(CompletionError::ApiError {
                status: status_code,
                message: error_text,
            }),
        }
    }
}
