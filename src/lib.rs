//! Note Translator - translate short notes through a hosted chat model
//!
//! This library wraps an OpenAI-compatible chat-completion endpoint and
//! builds English/Chinese translation prompts on top of it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod processors;
pub mod cli;

// Re-export key types for convenience
pub use crate::core::{
    client::ModelClient,
    config::{Credential, EndpointConfig},
    errors::{CompletionError, FailureKind},
    models::{Message, Role, SamplingParams},
    transport::{ChatTransport, HttpTransport},
};

pub use crate::processors::note::NoteTranslator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
