//! Chat-completion core: configuration, models, transport and client

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod transport;
