//! Main entry point for the note-translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use note_translator::cli::commands::{self, Commands};
use note_translator::{ModelClient, SamplingParams};

/// Translate short notes between English and Chinese
#[derive(Parser, Debug)]
#[command(name = "note-translator", version, about, long_about = None)]
struct Args {
    /// API key (optional, defaults to GITHUB_TOKEN env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Base address of the chat-completion service
    #[arg(long)]
    endpoint: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("note_translator={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = commands::load_config(args.config, args.api_key, args.endpoint)?;
    let client = ModelClient::new(&config)?;
    let mut out = std::io::stdout().lock();

    match args.command {
        Some(Commands::Translate {
            text,
            target_lang,
            model,
        }) => {
            commands::handle_translate(client, text, target_lang, model, &mut out).await?;
        }
        Some(Commands::Chat {
            prompt,
            system,
            model,
            temperature,
            top_p,
        }) => {
            let params = SamplingParams { temperature, top_p };
            commands::handle_chat(client, prompt, system, model, params, &mut out).await?;
        }
        None => {
            commands::handle_demo(client, &mut out).await?;
        }
    }

    Ok(())
}
