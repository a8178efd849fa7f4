//! Core data models for chat completion

use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that steer the model
    System,
    /// End-user input
    User,
    /// Model output
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single role-tagged chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who is speaking
    pub role: Role,
    /// Free-form message text
    pub content: String,
}

impl Message {
    /// Message with an explicit role
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// System instruction
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// User input
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Prior model output
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Sampling knobs forwarded to the model unvalidated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Randomness of sampling
    pub temperature: f64,
    /// Nucleus sampling probability mass
    pub top_p: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 1.0,
        }
    }
}

/// Body of a `POST /chat/completions` request
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Remote model id
    pub model: String,
    /// Conversation turn, in order
    pub messages: Vec<Message>,
    /// Sampling temperature
    pub temperature: f64,
    /// Nucleus sampling probability mass
    pub top_p: f64,
}

impl CompletionRequest {
    /// Request with default sampling parameters
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self::with_params(model, messages, SamplingParams::default())
    }

    /// Request with explicit sampling parameters
    pub fn with_params(
        model: impl Into<String>,
        messages: Vec<Message>,
        params: SamplingParams,
    ) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: params.temperature,
            top_p: params.top_p,
        }
    }
}

/// Message inside a returned choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// Role reported by the service
    pub role: Option<Role>,
    /// Reply text; absent for some non-text replies
    pub content: Option<String>,
}

/// One generated alternative
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// Position among the returned choices
    #[serde(default)]
    pub index: u32,
    /// Generated message
    pub message: ChoiceMessage,
    /// Why generation stopped
    pub finish_reason: Option<String>,
}

/// Token accounting reported by the service
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Usage {
    /// Tokens in the request
    #[serde(default)]
    pub prompt_tokens: usize,
    /// Tokens in the reply
    #[serde(default)]
    pub completion_tokens: usize,
    /// Sum of both
    #[serde(default)]
    pub total_tokens: usize,
}

/// Decoded `chat/completions` response
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    /// Service-assigned request id
    pub id: Option<String>,
    /// Model that actually answered
    pub model: Option<String>,
    /// Generated alternatives
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token accounting, when reported
    pub usage: Option<Usage>,
}

impl CompletionResponse {
    /// Content of the first choice, if the service produced one
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}
