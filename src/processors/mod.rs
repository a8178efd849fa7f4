//! Text processors built on the model client

pub mod note;
