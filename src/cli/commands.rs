//! CLI command definitions and handlers

use clap::Subcommand;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::core::client::ModelClient;
use crate::core::config::{Credential, EndpointConfig, API_KEY_ENV, ENDPOINT_ENV};
use crate::core::models::{Message, SamplingParams};
use crate::processors::note::{NoteTranslator, DEFAULT_TRANSLATION_MODEL};

/// Text translated when no subcommand is given
pub const DEMO_TEXT: &str = "Hello";

/// Target language of the demonstration run
pub const DEMO_TARGET_LANG: &str = "zh";

/// Commands for note-translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a piece of text
    Translate {
        /// Text to translate
        text: String,

        /// Target language: en, zh, or any language name (default: zh)
        #[arg(short, long, default_value = "zh")]
        target_lang: String,

        /// Model id to use
        #[arg(short, long, default_value = DEFAULT_TRANSLATION_MODEL)]
        model: String,
    },

    /// Send a single prompt to a model and print the reply
    Chat {
        /// User prompt
        prompt: String,

        /// Optional system instruction
        #[arg(long)]
        system: Option<String>,

        /// Model id to use
        #[arg(short, long, default_value = DEFAULT_TRANSLATION_MODEL)]
        model: String,

        /// Sampling temperature
        #[arg(long, default_value_t = 1.0)]
        temperature: f64,

        /// Nucleus sampling probability mass
        #[arg(long, default_value_t = 1.0)]
        top_p: f64,
    },
}

/// Build the endpoint configuration from file or environment plus CLI overrides
pub fn load_config(
    config_path: Option<PathBuf>,
    api_key: Option<String>,
    endpoint: Option<String>,
) -> anyhow::Result<EndpointConfig> {
    let Some(path) = config_path else {
        return EndpointConfig::from_lookup(|name| match name {
            API_KEY_ENV if api_key.is_some() => api_key.clone(),
            ENDPOINT_ENV if endpoint.is_some() => endpoint.clone(),
            _ => std::env::var(name).ok(),
        });
    };

    info!("Loading configuration from {}", path.display());
    let mut config = EndpointConfig::read_file(&path)?;

    if let Some(key) = api_key {
        config.api_key = Credential::new(key);
    }
    if let Some(url) = endpoint {
        config.base_url = url;
    }
    config.validate()?;

    Ok(config)
}

/// Translate `text` and report the outcome to `out`; failures are reported, not returned
pub async fn handle_translate<W: Write>(
    client: ModelClient,
    text: String,
    target_lang: String,
    model: String,
    out: &mut W,
) -> anyhow::Result<()> {
    let translator = NoteTranslator::new(client).with_model(model);

    writeln!(out, "Translating '{}' to {}...", text, target_lang)?;

    match translator.translate(&text, &target_lang).await {
        Ok(translated) => writeln!(out, "Translation: {}", translated)?,
        Err(_) => writeln!(out, "Translation failed.")?,
    }

    Ok(())
}

/// Run the built-in demonstration translation
pub async fn handle_demo<W: Write>(client: ModelClient, out: &mut W) -> anyhow::Result<()> {
    handle_translate(
        client,
        DEMO_TEXT.to_string(),
        DEMO_TARGET_LANG.to_string(),
        DEFAULT_TRANSLATION_MODEL.to_string(),
        out,
    )
    .await
}

/// Send a raw prompt and write the reply to `out`
pub async fn handle_chat<W: Write>(
    client: ModelClient,
    prompt: String,
    system: Option<String>,
    model: String,
    params: SamplingParams,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system {
        messages.push(Message::system(system));
    }
    messages.push(Message::user(prompt));

    match client.invoke(&model, messages, params).await {
        Ok(reply) => writeln!(out, "{}", reply)?,
        Err(_) => writeln!(out, "Request failed.")?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::tests::{network_down, StubTransport};
    use std::sync::Arc;

    fn rendered(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_translate_prints_translation() {
        let client = ModelClient::with_transport(Arc::new(StubTransport::replying(&["Bonjour"])));
        let mut out = Vec::new();

        handle_translate(
            client,
            "Hello".to_string(),
            "fr".to_string(),
            DEFAULT_TRANSLATION_MODEL.to_string(),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(rendered(out), "Translating 'Hello' to fr...\nTranslation: Bonjour\n");
    }

    #[tokio::test]
    async fn test_translate_failure_prints_notice() {
        let client = ModelClient::with_transport(Arc::new(StubTransport::failing(network_down)));
        let mut out = Vec::new();

        let result = handle_translate(
            client,
            "Hello".to_string(),
            "zh".to_string(),
            DEFAULT_TRANSLATION_MODEL.to_string(),
            &mut out,
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(rendered(out), "Translating 'Hello' to zh...\nTranslation failed.\n");
    }

    #[tokio::test]
    async fn test_demo_translates_hello_to_chinese() {
        let stub = Arc::new(StubTransport::replying(&["你好"]));
        let client = ModelClient::with_transport(stub.clone());
        let mut out = Vec::new();

        handle_demo(client, &mut out).await.unwrap();

        assert_eq!(rendered(out), "Translating 'Hello' to zh...\nTranslation: 你好\n");

        let request = stub.last_request().unwrap();
        assert_eq!(request.model, DEFAULT_TRANSLATION_MODEL);
        assert!(request.messages[1]
            .content
            .ends_with("Translate the following text to Chinese: \n\nHello"));
    }

    #[tokio::test]
    async fn test_chat_with_system_prompt() {
        let stub = Arc::new(StubTransport::replying(&["pong"]));
        let client = ModelClient::with_transport(stub.clone());
        let mut out = Vec::new();

        handle_chat(
            client,
            "ping".to_string(),
            Some("answer tersely".to_string()),
            "gpt-4o".to_string(),
            SamplingParams {
                temperature: 0.0,
                top_p: 1.0,
            },
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(rendered(out), "pong\n");

        let request = stub.last_request().unwrap();
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].content, "answer tersely");
        assert_eq!(request.messages[1].content, "ping");
        assert_eq!(request.temperature, 0.0);
    }

    #[tokio::test]
    async fn test_chat_failure_prints_notice() {
        let client = ModelClient::with_transport(Arc::new(StubTransport::failing(network_down)));
        let mut out = Vec::new();

        handle_chat(
            client,
            "ping".to_string(),
            None,
            DEFAULT_TRANSLATION_MODEL.to_string(),
            SamplingParams::default(),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(rendered(out), "Request failed.\n");
    }

    #[test]
    fn test_load_config_file_with_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_key": "from_file", "base_url": "https://a.test"}}"#).unwrap();

        let config = load_config(
            Some(file.path().to_path_buf()),
            None,
            Some("https://b.test".to_string()),
        )
        .unwrap();

        assert_eq!(config.api_key.expose(), "from_file");
        assert_eq!(config.base_url, "https://b.test");
    }

    #[test]
    fn test_load_config_cli_key_fills_empty_file_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_key": "", "base_url": "https://a.test"}}"#).unwrap();

        let config =
            load_config(Some(file.path().to_path_buf()), Some("cli_key".to_string()), None)
                .unwrap();

        assert_eq!(config.api_key.expose(), "cli_key");
        assert_eq!(config.base_url, "https://a.test");
    }

    #[test]
    fn test_load_config_cli_key_fills_missing_file_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"timeout_ms": 800}}"#).unwrap();

        let config =
            load_config(Some(file.path().to_path_buf()), Some("cli_key".to_string()), None)
                .unwrap();

        assert_eq!(config.api_key.expose(), "cli_key");
        assert_eq!(config.timeout_ms, 800);
    }

    #[test]
    fn test_load_config_file_without_any_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"base_url": "https://a.test"}}"#).unwrap();

        assert!(load_config(Some(file.path().to_path_buf()), None, None).is_err());
    }

    #[test]
    fn test_load_config_cli_key() {
        let config = load_config(None, Some("cli_key".to_string()), None).unwrap();
        assert_eq!(config.api_key.expose(), "cli_key");
    }
}
