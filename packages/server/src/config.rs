//! Process configuration loaded from the environment.
//!
//! All environment access happens here; the pipeline receives the
//! credential as an explicit value and never reads variables itself.

use anyhow::{Context, Result};
use receipts::ModelCredentials;

/// Default chat model when `RECEIPTS_MODEL` is unset.
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Server configuration.
#[derive(Debug)]
pub struct Config {
    /// Port to listen on (`PORT`, default 3000)
    pub port: u16,

    /// Model credentials (`ANTHROPIC_API_KEY`, `RECEIPTS_MODEL`)
    pub credentials: ModelCredentials,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT is not a valid port number")?,
            Err(_) => 3000,
        };

        let api_key =
            std::env::var("ANTHROPIC_API_KEY").context("ANTHROPIC_API_KEY not set")?;
        let model =
            std::env::var("RECEIPTS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            port,
            credentials: ModelCredentials::new(api_key, model),
        })
    }
}
