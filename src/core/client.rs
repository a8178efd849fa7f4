//! Chat-completion client

use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::config::EndpointConfig;
use crate::core::errors::{CompletionError, Result};
use crate::core::models::{CompletionRequest, Message, SamplingParams};
use crate::core::transport::{ChatTransport, HttpTransport};

/// Client that performs one chat-completion round-trip per call
#[derive(Clone)]
pub struct ModelClient {
    transport: Arc<dyn ChatTransport>,
}

impl std::fmt::Debug for ModelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClient").finish_non_exhaustive()
    }
}

impl ModelClient {
    /// Create a client talking HTTP to the configured endpoint
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = EndpointConfig::from_env()?;
        Self::new(&config)
    }

    /// Send `messages` to `model` and return the first choice's content.
    ///
    /// Every failure is logged once and returned as `Err`; the reply text is
    /// passed back untouched.
    pub async fn invoke(
        &self,
        model: &str,
        messages: Vec<Message>,
        params: SamplingParams,
    ) -> Result<String> {
        let result = self.call(model, messages, params).await;

        if let Err(e) = &result {
            warn!(kind = %e.kind(), "An error occurred: {}", e);
        }

        result
    }

    /// `invoke` with temperature and top-p both at 1.0
    pub async fn invoke_default(&self, model: &str, messages: Vec<Message>) -> Result<String> {
        self.invoke(model, messages, SamplingParams::default()).await
    }

    async fn call(
        &self,
        model: &str,
        messages: Vec<Message>,
        params: SamplingParams,
    ) -> Result<String> {
        if model.trim().is_empty() {
            return Err(CompletionError::InvalidRequest {
                message: "model name must not be empty".to_string(),
            });
        }

        if messages.is_empty() {
            return Err(CompletionError::InvalidRequest {
                message: "at least one message is required".to_string(),
            });
        }

        let request = CompletionRequest::with_params(model, messages, params);
        let response = self.transport.send(&request).await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Model {} used {} tokens ({} prompt, {} completion)",
                model, usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
            );
        }

        if response.choices.is_empty() {
            return Err(CompletionError::InvalidResponseError {
                message: "No choices in response".to_string(),
            });
        }

        response
            .first_content()
            .map(|s| s.to_string())
            .ok_or_else(|| CompletionError::InvalidResponseError {
                message: "First choice has no content".to_string(),
            })
    }
}
