//! Note translation between English and Chinese

use tracing::debug;

use crate::core::client::ModelClient;
use crate::core::errors::Result;
use crate::core::models::Message;

/// Model used for translation unless overridden
pub const DEFAULT_TRANSLATION_MODEL: &str = "gpt-4.1-mini";

const SYSTEM_PROMPT: &str =
    "You are a precise translation assistant. Return only the translated text without explanations.";

/// Human-readable language name for a target code.
///
/// `en` and `zh` are mapped; anything else is used verbatim.
pub fn target_language_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "zh" => "Chinese",
        other => other,
    }
}

/// Build the two-message translation prompt
pub fn build_messages(text: &str, target_lang: &str) -> Vec<Message> {
    let target = target_language_name(target_lang);
    vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(format!(
            "Translate the following text to {}: \n\n{}",
            target, text
        )),
    ]
}

/// Translates short notes through a chat model
#[derive(Debug, Clone)]
pub struct NoteTranslator {
    client: ModelClient,
    model: String,
}

impl NoteTranslator {
    /// Create a new note translator
    pub fn new(client: ModelClient) -> Self {
        Self {
            client,
            model: DEFAULT_TRANSLATION_MODEL.to_string(),
        }
    }

    /// Create from environment configuration
    pub fn from_env() -> Result<Self> {
        let client = ModelClient::from_env()?;
        Ok(Self::new(client))
    }

    /// Use a different model id
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Model id used for translation
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Translate `text` into the language named by `target_lang`.
    ///
    /// The reply is returned exactly as the model produced it.
    pub async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        debug!(
            "Translating {} chars to {} with {}",
            text.chars().count(),
            target_language_name(target_lang),
            self.model
        );

        let messages = build_messages(text, target_lang);
        self.client.invoke_default(&self.model, messages).await
    }
}
